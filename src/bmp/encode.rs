//! BMP writer: wraps a normalized image in an uncompressed top-down BMP.

use alloc::vec::Vec;
use enough::Stop;

use super::header::{FILE_HEADER_LEN, MIN_INFO_HEADER_LEN};
use super::utils::swap_red_blue;
use crate::decode::NormalizedImage;
use crate::error::BmpError;
use crate::pixel::PixelLayout;

const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

// Red, green, blue masks of a 5-6-5 pixel.
const RGB565_MASKS: [u32; 3] = [0xF800, 0x07E0, 0x001F];

/// Encode `image` as a top-down BMP (negative height) with padded rows.
pub(crate) fn encode_top_down(
    image: &NormalizedImage,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let (width, height) = (image.width, image.height);
    let too_large = || BmpError::DimensionsTooLarge { width, height };
    let signed_width = i32::try_from(width).map_err(|_| too_large())?;
    let signed_height = i32::try_from(height).map_err(|_| too_large())?;

    let bytewidth = image.pitch();
    let expected = bytewidth
        .checked_mul(height as usize)
        .ok_or_else(too_large)?;
    if image.pixels().len() < expected {
        return Err(BmpError::BufferTooSmall {
            needed: expected,
            actual: image.pixels().len(),
        });
    }

    let row_stride = bytewidth
        .checked_add(3)
        .map(|r| r & !3)
        .ok_or_else(too_large)?;
    let pixel_data_size = row_stride
        .checked_mul(height as usize)
        .ok_or_else(too_large)?;
    let masks_len = if image.layout == PixelLayout::Rgb565 {
        RGB565_MASKS.len() * 4
    } else {
        0
    };
    let data_offset = FILE_HEADER_LEN + MIN_INFO_HEADER_LEN as usize + masks_len;
    let file_size = pixel_data_size
        .checked_add(data_offset)
        .ok_or_else(too_large)?;
    let file_size_field = u32::try_from(file_size).map_err(|_| too_large())?;

    let mut out = Vec::with_capacity(file_size);

    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size_field.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());

    // BITMAPINFOHEADER (40 bytes)
    let compression = if masks_len > 0 { BI_BITFIELDS } else { BI_RGB };
    out.extend_from_slice(&MIN_INFO_HEADER_LEN.to_le_bytes());
    out.extend_from_slice(&signed_width.to_le_bytes());
    out.extend_from_slice(&(-signed_height).to_le_bytes()); // negative = top-down
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&(image.layout.bits_per_pixel() as u16).to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    if masks_len > 0 {
        for mask in RGB565_MASKS {
            out.extend_from_slice(&mask.to_le_bytes());
        }
    }

    let pad = row_stride - bytewidth;
    for (y, row) in image.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let start = out.len();
        out.extend_from_slice(row);
        swap_red_blue(&mut out[start..], image.layout);
        out.extend(core::iter::repeat_n(0u8, pad));
    }

    Ok(out)
}
