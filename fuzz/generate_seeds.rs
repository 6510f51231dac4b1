#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bits: u16, rows: usize) -> Vec<u8> {
    let bytewidth = width.unsigned_abs() as usize * bits as usize / 8;
    let pitch = (bytewidth + 3) & !3;
    let size = 54 + pitch * rows;
    let mut bmp = vec![0u8; size];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(size as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bits.to_le_bytes());
    for (i, b) in bmp[54..].iter_mut().enumerate() {
        *b = (i * 37) as u8;
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/rgb_1x1.bmp"), bmp(1, 1, 24, 1)).unwrap();
    fs::write(format!("{dir}/rgb_4x2.bmp"), bmp(4, 2, 24, 2)).unwrap();
    fs::write(format!("{dir}/rgba_3x3_topdown.bmp"), bmp(3, -3, 32, 3)).unwrap();
    fs::write(format!("{dir}/rgb565_2x2_topdown.bmp"), bmp(2, -2, 16, 2)).unwrap();
    fs::write(format!("{dir}/rgb565_5x4.bmp"), bmp(5, 4, 16, 4)).unwrap();
    fs::write(format!("{dir}/pal8_4x1.bmp"), bmp(4, 1, 8, 1)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut truncated = bmp(8, 8, 32, 8);
    truncated.truncate(100);
    fs::write(format!("{dir}/rgba_truncated.bmp"), truncated).unwrap();

    println!("Generated seed corpus in {dir}/");
}
