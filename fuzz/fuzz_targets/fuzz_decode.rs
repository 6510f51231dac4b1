#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Both normalizers must reject garbage without panicking
    let _ = bmpfeed::decode_bmp(data, enough::Unstoppable);
    let _ = bmpfeed::normalize_rgb565(data, enough::Unstoppable);
    let _ = bmpfeed::DecodeRequest::new(data)
        .with_scratch_sizing(bmpfeed::ScratchSizing::Exact)
        .normalize_rgb565(enough::Unstoppable);
});
