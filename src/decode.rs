use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::bmp::BitmapHeader;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Top-down, unpadded, channel-corrected pixels ready for a block encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedImage {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
}

impl NormalizedImage {
    pub(crate) fn new(pixels: Vec<u8>, width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            pixels,
            width,
            height,
            layout,
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.layout.bits_per_pixel()
    }

    /// Bytes from one row to the next. Rows are tightly packed, so this is
    /// also the row length.
    pub fn pitch(&self) -> usize {
        self.width as usize * self.layout.bytes_per_pixel()
    }

    /// Rows, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels
            .chunks_exact(self.pitch().max(1))
            .take(self.height as usize)
    }

    /// Row `y`, counted from the visual top.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let pitch = self.pitch();
        let start = y as usize * pitch;
        self.pixels.get(start..start + pitch)
    }

    /// Bytes reserved for the pixel buffer, which may exceed `pixels().len()`
    /// under [`ScratchSizing::InputLength`].
    pub fn allocated_bytes(&self) -> usize {
        self.pixels.capacity()
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`BmpError::UnsupportedVariant`] if the layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(BmpError::UnsupportedVariant(alloc::format!(
                "cannot view {:?} pixels as {:?}",
                self.layout,
                P::layout()
            )));
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// How large the 16-bit normalizer's output allocation is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScratchSizing {
    /// Reserve as many bytes as the input BMP, however much the rows need.
    #[default]
    InputLength,
    /// Reserve exactly `height * bytewidth`.
    Exact,
}

/// Builder for normalizing BMP bytes already in memory.
///
/// ```
/// use bmpfeed::{DecodeRequest, Limits, Unstoppable};
///
/// let bmp: &[u8] = b"not a bitmap";
/// let limits = Limits::new().with_max_pixels(1 << 24);
/// let result = DecodeRequest::new(bmp).with_limits(&limits).decode(Unstoppable);
/// assert!(result.is_err());
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    sizing: ScratchSizing,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            sizing: ScratchSizing::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Allocation policy for [`Self::normalize_rgb565`].
    pub fn with_scratch_sizing(mut self, sizing: ScratchSizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Parse the header without touching pixel data.
    pub fn header(&self) -> Result<BitmapHeader, BmpError> {
        BitmapHeader::parse(self.data)
    }

    /// Normalize a 16, 24 or 32-bit BMP. 24/32-bit rows come out as RGB(A).
    pub fn decode(self, stop: impl Stop) -> Result<NormalizedImage, BmpError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }

    /// Normalize a BMP that must be exactly 16 bits per pixel (RGB565),
    /// passing pixel values through unchanged.
    pub fn normalize_rgb565(self, stop: impl Stop) -> Result<NormalizedImage, BmpError> {
        crate::bmp::normalize_rgb565(self.data, self.sizing, self.limits, &stop)
    }
}
