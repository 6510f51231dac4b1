#![allow(dead_code)]

/// Padding byte used by [`bmp_bytes`], chosen so leaked padding is obvious.
pub const PAD: u8 = 0xCC;

/// Build an uncompressed BMP. `stored_rows` are given in file order (the
/// first one is the bottom row when `height` is positive) and are padded to
/// a 4-byte boundary with [`PAD`].
pub fn bmp_bytes(width: i32, height: i32, bits: u16, stored_rows: &[&[u8]]) -> Vec<u8> {
    let bytewidth = width.unsigned_abs() as usize * bits as usize / 8;
    let pitch = (bytewidth + 3) & !3;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((54 + pitch * stored_rows.len()) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(&[0; 24]);
    assert_eq!(out.len(), 54);
    for row in stored_rows {
        assert_eq!(row.len(), bytewidth, "fixture row length");
        out.extend_from_slice(row);
        out.extend(std::iter::repeat_n(PAD, pitch - bytewidth));
    }
    out
}

/// Deterministic noise, as in the codec corpus tests.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}
