#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpfeed::*;

fuzz_target!(|data: &[u8]| {
    // Anything that normalizes must survive a trip through the writer unchanged
    let Ok(image) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    let Ok(rewritten) = encode_bmp(&image, enough::Unstoppable) else {
        panic!("normalized image failed to re-encode");
    };
    let Ok(again) = decode_bmp(&rewritten, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(image.pixels(), again.pixels(), "roundtrip pixel mismatch");
    assert_eq!(image.width, again.width);
    assert_eq!(image.height, again.height);
    assert_eq!(image.layout, again.layout);
});
