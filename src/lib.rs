//! # bmpfeed
//!
//! Windows bitmap (BMP) loading and row normalization for block-based image
//! encoders.
//!
//! BMP stores rows bottom-up (unless the height is negative), pads every row
//! to a 4-byte boundary, and keeps 24/32-bit pixels in BGR(A) order. Block
//! encoders want the opposite: top row first, tightly packed, RGB(A). This
//! crate does that conversion and then drives an encoder you supply.
//!
//! ## Supported input
//!
//! - 24-bit and 32-bit uncompressed BMP → `Rgb8` / `Rgba8` (red and blue swapped)
//! - 16-bit BMP → `Rgb565`, pixel values passed through unchanged
//! - Palette images (≤ 8 bits) and RLE compression are rejected
//!
//! ## Pipelines
//!
//! - [`load_bmp`] / [`decode_bmp`]: 16/24/32-bit, from a file or from memory.
//! - [`normalize_rgb565`]: in-memory, 16-bit only.
//! - [`encoder::encode_frame`]: one begin/frame/end session on a
//!   [`encoder::BlockEncoder`].
//! - [`pipeline::process_bmp_file`] / [`pipeline::process_bmp_data`]:
//!   the above plus writing the encoded bytes to a file.
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfeed::{DecodeRequest, PixelLayout, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! let image = DecodeRequest::new(data).decode(Unstoppable)?;
//! assert_eq!(image.pitch(), image.width as usize * image.layout.bytes_per_pixel());
//! for row in image.rows() {
//!     // top row first, no padding
//!     let _ = row;
//! }
//! # Ok::<(), bmpfeed::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod limits;
mod pixel;

pub mod bmp;
pub mod encoder;

#[cfg(feature = "std")]
pub mod pipeline;

use alloc::vec::Vec;

// Re-exports
pub use bmp::{BitmapHeader, Geometry};
pub use decode::{DecodeRequest, NormalizedImage, ScratchSizing};
pub use encoder::{BlockEncoder, EncodeConfig, EncodedFrame, PixelFormat, Quality, Subsampling};
pub use enough::{Stop, Unstoppable};
pub use error::{BmpError, ErrorKind};
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

/// Normalize a 16, 24 or 32-bit BMP held in memory.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<NormalizedImage, BmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Normalize an in-memory BMP that must be 16 bits per pixel.
pub fn normalize_rgb565(data: &[u8], stop: impl Stop) -> Result<NormalizedImage, BmpError> {
    DecodeRequest::new(data).normalize_rgb565(stop)
}

/// Read a 16, 24 or 32-bit BMP file and normalize it.
#[cfg(feature = "std")]
pub fn load_bmp(
    path: impl AsRef<std::path::Path>,
    stop: impl Stop,
) -> Result<NormalizedImage, BmpError> {
    bmp::load(path.as_ref(), None, &stop)
}

/// Like [`load_bmp`], enforcing `limits`.
#[cfg(feature = "std")]
pub fn load_bmp_with_limits(
    path: impl AsRef<std::path::Path>,
    limits: &Limits,
    stop: impl Stop,
) -> Result<NormalizedImage, BmpError> {
    bmp::load(path.as_ref(), Some(limits), &stop)
}

/// Wrap a normalized image in an uncompressed top-down BMP.
///
/// Normalizing the result gives back the same image.
pub fn encode_bmp(image: &NormalizedImage, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    bmp::encode(image, &stop)
}
