//! Row normalization: padding removal, orientation correction and channel
//! order for uncompressed 16/24/32-bit BMP pixel data.

use alloc::vec::Vec;

use enough::Stop;

use super::header::Geometry;
use super::utils::swap_red_blue;
use crate::error::BmpError;
use crate::pixel::PixelLayout;

/// Append the stored rows of `data` to `out`, top row first, without
/// padding, swapping red and blue where `layout` requires it.
///
/// `data` is the whole BMP file; `geom` locates the rows within it.
pub(crate) fn normalize_rows(
    data: &[u8],
    geom: &Geometry,
    layout: PixelLayout,
    out: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    let src = data
        .get(geom.source_span()?)
        .ok_or(BmpError::UnexpectedEof)?;
    let bytewidth = geom.bytewidth();
    let swizzle = layout.is_swizzled_in_bmp();

    out.reserve(geom.output_len());
    for y in 0..geom.height() as usize {
        if y % 16 == 0 {
            stop.check()?;
        }
        let start = geom.stored_row_start(y);
        let row = &src[start..start + bytewidth];
        let dst_start = out.len();
        out.extend_from_slice(row);
        if swizzle {
            swap_red_blue(&mut out[dst_start..], layout);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    // 2x3 rows of 24-bit pixels at offset 2, pitch 8 (6 data + 2 padding).
    fn stored() -> Vec<u8> {
        let mut d = vec![0xEE, 0xEE];
        d.extend_from_slice(&[1, 2, 3, 4, 5, 6, 0xAA, 0xAA]);
        d.extend_from_slice(&[7, 8, 9, 10, 11, 12, 0xAA, 0xAA]);
        d.extend_from_slice(&[13, 14, 15, 16, 17, 18]);
        d
    }

    #[test]
    fn bottom_up_is_flipped_and_swapped() {
        let geom = Geometry::new(2, 3, 24, 2, true).unwrap();
        let mut out = Vec::new();
        normalize_rows(&stored(), &geom, PixelLayout::Rgb8, &mut out, &Unstoppable).unwrap();
        assert_eq!(
            out,
            [
                15, 14, 13, 18, 17, 16, //
                9, 8, 7, 12, 11, 10, //
                3, 2, 1, 6, 5, 4,
            ]
        );
    }

    #[test]
    fn top_down_keeps_order() {
        let geom = Geometry::new(3, 3, 16, 2, false).unwrap();
        let mut out = Vec::new();
        normalize_rows(&stored(), &geom, PixelLayout::Rgb565, &mut out, &Unstoppable).unwrap();
        assert_eq!(
            out,
            [
                1, 2, 3, 4, 5, 6, //
                7, 8, 9, 10, 11, 12, //
                13, 14, 15, 16, 17, 18,
            ]
        );
    }

    #[test]
    fn short_source_is_eof() {
        let geom = Geometry::new(2, 4, 24, 2, true).unwrap();
        let mut out = Vec::new();
        let err = normalize_rows(&stored(), &geom, PixelLayout::Rgb8, &mut out, &Unstoppable)
            .unwrap_err();
        assert!(matches!(err, BmpError::UnexpectedEof));
        assert!(out.is_empty());
    }
}
