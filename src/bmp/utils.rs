//! Red/blue channel swaps for BMP rows.
//!
//! With the `simd` feature the swaps go through garb's dispatched row
//! kernels; otherwise (or if garb rejects the row) a scalar loop is used.

use crate::pixel::PixelLayout;

/// Swap bytes 0 and 2 of every pixel in `row`, in place.
///
/// Rows of layouts that BMP does not store swizzled are left alone.
pub(crate) fn swap_red_blue(row: &mut [u8], layout: PixelLayout) {
    match layout {
        PixelLayout::Rgba8 => swap_rb4(row),
        PixelLayout::Rgb8 => swap_rb3(row),
        PixelLayout::Rgb565 => {}
    }
}

fn swap_rb4(row: &mut [u8]) {
    #[cfg(feature = "simd")]
    if garb::bytes::bgra_to_rgba_inplace(row).is_ok() {
        return;
    }
    for px in row.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

fn swap_rb3(row: &mut [u8]) {
    #[cfg(feature = "simd")]
    if garb::bytes::bgr_to_rgb_inplace(row).is_ok() {
        return;
    }
    for px in row.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
}
