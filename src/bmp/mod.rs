//! BMP loading and row normalization (internal entry points).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::normalize_rgb565`],
//! [`crate::load_bmp`] and [`crate::encode_bmp`].

mod decode;
mod encode;
mod header;
mod utils;

pub use header::{BitmapHeader, Geometry};

use crate::decode::{NormalizedImage, ScratchSizing};
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use alloc::vec::Vec;
use enough::Stop;

/// Normalize a 16/24/32-bit BMP held in memory.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<NormalizedImage, BmpError> {
    let header = BitmapHeader::parse(data)?;
    let bits = header.bits_per_pixel();
    if bits <= 8 {
        return Err(BmpError::UnsupportedVariant(alloc::format!(
            "{bits}-bit palette images not supported"
        )));
    }
    let layout = PixelLayout::for_bits(bits).ok_or_else(|| {
        BmpError::UnsupportedVariant(alloc::format!("BMP bit depth {bits} unsupported"))
    })?;
    reject_rle(&header)?;

    let geom = header.geometry()?;
    normalize(data, &geom, layout, geom.output_len(), limits, stop)
}

/// Read a BMP file fully and normalize it.
#[cfg(feature = "std")]
pub(crate) fn load(
    path: &std::path::Path,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<NormalizedImage, BmpError> {
    let raw = std::fs::read(path)?;
    decode(&raw, limits, stop)
}

/// Normalize a BMP that must be exactly 16 bits per pixel.
pub(crate) fn normalize_rgb565(
    data: &[u8],
    sizing: ScratchSizing,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<NormalizedImage, BmpError> {
    let header = BitmapHeader::parse(data)?;
    let bits = header.bits_per_pixel();
    if bits != 16 {
        return Err(BmpError::UnexpectedBitDepth {
            expected: 16,
            actual: bits,
        });
    }
    reject_rle(&header)?;

    let geom = header.geometry()?;
    let capacity = match sizing {
        ScratchSizing::InputLength => data.len().max(geom.output_len()),
        ScratchSizing::Exact => geom.output_len(),
    };
    normalize(data, &geom, PixelLayout::Rgb565, capacity, limits, stop)
}

/// Encode a normalized image as a top-down BMP.
pub(crate) fn encode(image: &NormalizedImage, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    encode::encode_top_down(image, stop)
}

fn reject_rle(header: &BitmapHeader) -> Result<(), BmpError> {
    if header.is_rle() {
        return Err(BmpError::UnsupportedVariant(
            "RLE-compressed BMP not supported".into(),
        ));
    }
    Ok(())
}

fn normalize(
    data: &[u8],
    geom: &Geometry,
    layout: PixelLayout,
    capacity: usize,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<NormalizedImage, BmpError> {
    if let Some(limits) = limits {
        limits.check(geom.width(), geom.height(), capacity)?;
    }
    // Rows must all be present before anything is allocated for them.
    if data.len() < geom.source_span()?.end {
        return Err(BmpError::UnexpectedEof);
    }
    stop.check()?;

    log::trace!(
        "BMP {}x{} {} bpp, bytewidth {}, pitch {}, {}",
        geom.width(),
        geom.height(),
        geom.bits_per_pixel(),
        geom.bytewidth(),
        geom.pitch(),
        if geom.is_bottom_up() { "bottom-up" } else { "top-down" }
    );

    let mut pixels = Vec::with_capacity(capacity);
    decode::normalize_rows(data, geom, layout, &mut pixels, stop)?;
    Ok(NormalizedImage::new(pixels, geom.width(), geom.height(), layout))
}
