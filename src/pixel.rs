/// Pixel memory layout of a normalized image.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 16-bit packed RGB565, little-endian words, passed through unchanged.
    Rgb565,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA (the BMP's fourth byte, alpha or padding).
    Rgba8,
}

impl PixelLayout {
    /// Layout produced by the loader for a given BMP bit depth.
    pub fn for_bits(bits_per_pixel: u32) -> Option<Self> {
        match bits_per_pixel {
            16 => Some(Self::Rgb565),
            24 => Some(Self::Rgb8),
            32 => Some(Self::Rgba8),
            _ => None,
        }
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Rgb565 => 2,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.bytes_per_pixel() as u32 * 8
    }

    /// Whether the BMP stores this layout with red and blue swapped.
    pub(crate) fn is_swizzled_in_bmp(&self) -> bool {
        matches!(self, Self::Rgb8 | Self::Rgba8)
    }
}

/// Typed pixels that a normalized image can be viewed as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}
