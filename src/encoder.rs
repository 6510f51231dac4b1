//! Driving an external block-based encoder with a normalized image.
//!
//! The encoder itself lives outside this crate and plugs in through
//! [`BlockEncoder`]. [`encode_frame`] runs one session: begin, one frame,
//! end.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use enough::Stop;

use crate::decode::NormalizedImage;
use crate::error::BmpError;
use crate::pixel::PixelLayout;

/// Bytes kept free between the high-water mark and the end of the output.
pub const DEFAULT_HIGH_WATER_MARGIN: usize = 512;

/// Pixel format tag handed to the encoder.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Never derived from a BMP; only reachable through
    /// [`EncodeConfig::with_pixel_format`].
    Grayscale,
    Rgb565,
    Rgb888,
    Rgba8888,
}

impl From<PixelLayout> for PixelFormat {
    fn from(layout: PixelLayout) -> Self {
        match layout {
            PixelLayout::Rgb565 => Self::Rgb565,
            PixelLayout::Rgb8 => Self::Rgb888,
            PixelLayout::Rgba8 => Self::Rgba8888,
        }
    }
}

/// Chroma subsampling mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Subsampling {
    /// Full-resolution chroma.
    S444,
    /// Chroma halved in both directions.
    #[default]
    S420,
}

/// Encoder quality preset, lowest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quality {
    Low,
    Medium,
    #[default]
    High,
    Best,
}

/// Everything an encoder needs to open a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionParams {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub subsampling: Subsampling,
    pub quality: Quality,
}

/// Caller-owned output for one encoder session.
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
    high_water: usize,
}

impl OutputBuffer {
    /// A zeroed buffer of `len` bytes whose high-water mark sits `margin`
    /// bytes before the end.
    pub fn new(len: usize, margin: usize) -> Self {
        Self {
            data: vec![0; len],
            high_water: len.saturating_sub(margin),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset at which the encoder should treat the buffer as nearly full.
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// A block-based image encoder writing into an [`OutputBuffer`].
pub trait BlockEncoder {
    type Error: fmt::Display;

    /// Open a session for an image described by `params`.
    fn begin(&mut self, out: &mut OutputBuffer, params: &SessionParams) -> Result<(), Self::Error>;

    /// Encode one frame of `pixels`, rows `pitch` bytes apart.
    fn add_frame(
        &mut self,
        out: &mut OutputBuffer,
        pixels: &[u8],
        pitch: usize,
    ) -> Result<(), Self::Error>;

    /// Flush and close the session, returning the encoded byte count.
    fn end(&mut self, out: &mut OutputBuffer) -> usize;
}

/// Size of the encoder's output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputBudget {
    /// `width * height * 3 / 4` bytes.
    QuarterPlanar,
    /// A fixed number of bytes.
    Bytes(usize),
}

impl OutputBudget {
    pub fn resolve(&self, width: u32, height: u32) -> Result<usize, BmpError> {
        match *self {
            Self::QuarterPlanar => (width as usize)
                .checked_mul(height as usize)
                .and_then(|px| px.checked_mul(3))
                .map(|b| b / 4)
                .ok_or(BmpError::DimensionsTooLarge { width, height }),
            Self::Bytes(n) => Ok(n),
        }
    }
}

/// Encoder session settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeConfig {
    pub subsampling: Subsampling,
    pub quality: Quality,
    /// Overrides the format derived from the image layout.
    pub pixel_format: Option<PixelFormat>,
    /// `None` lets the caller pick; [`encode_frame`] uses
    /// [`OutputBudget::QuarterPlanar`].
    pub output_budget: Option<OutputBudget>,
    pub high_water_margin: usize,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            subsampling: Subsampling::default(),
            quality: Quality::default(),
            pixel_format: None,
            output_budget: None,
            high_water_margin: DEFAULT_HIGH_WATER_MARGIN,
        }
    }
}

impl EncodeConfig {
    /// 4:2:0, high quality, format from the image.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subsampling(mut self, subsampling: Subsampling) -> Self {
        self.subsampling = subsampling;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_pixel_format(mut self, format: PixelFormat) -> Self {
        self.pixel_format = Some(format);
        self
    }

    pub fn with_output_budget(mut self, budget: OutputBudget) -> Self {
        self.output_budget = Some(budget);
        self
    }

    pub fn with_high_water_margin(mut self, margin: usize) -> Self {
        self.high_water_margin = margin;
        self
    }

    /// Same config with `budget` filled in when none was chosen.
    #[cfg(feature = "std")]
    pub(crate) fn or_budget(&self, budget: OutputBudget) -> Self {
        let mut config = self.clone();
        config.output_budget.get_or_insert(budget);
        config
    }
}

/// Result of one encoder session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    bytes: Vec<u8>,
    began: bool,
    begin_error: Option<String>,
}

impl EncodedFrame {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the session opened and the frame was submitted.
    pub fn began(&self) -> bool {
        self.began
    }

    /// The encoder's message when the session failed to open.
    pub fn begin_error(&self) -> Option<&str> {
        self.begin_error.as_deref()
    }
}

/// Run one encoder session over `image`.
///
/// A failed `begin` skips the frame but the session is still ended and
/// whatever the encoder produced is returned, with
/// [`EncodedFrame::began`] false. A failed `add_frame` is reported after
/// `end` has run.
pub fn encode_frame<E: BlockEncoder>(
    encoder: &mut E,
    image: &NormalizedImage,
    config: &EncodeConfig,
    stop: &dyn Stop,
) -> Result<EncodedFrame, BmpError> {
    stop.check()?;

    let budget = config
        .output_budget
        .unwrap_or(OutputBudget::QuarterPlanar)
        .resolve(image.width, image.height)?;
    let mut out = OutputBuffer::new(budget, config.high_water_margin);
    let params = SessionParams {
        width: image.width,
        height: image.height,
        format: config
            .pixel_format
            .unwrap_or_else(|| PixelFormat::from(image.layout)),
        subsampling: config.subsampling,
        quality: config.quality,
    };

    let (began, begin_error, frame_result) = match encoder.begin(&mut out, &params) {
        Ok(()) => {
            let frame = encoder
                .add_frame(&mut out, image.pixels(), image.pitch())
                .map_err(|e| BmpError::Encoder(e.to_string()));
            (true, None, frame)
        }
        Err(e) => {
            let msg = e.to_string();
            log::warn!("encoder begin failed ({msg}); finalizing without a frame");
            (false, Some(msg), Ok(()))
        }
    };

    let written = encoder.end(&mut out).min(out.len());
    frame_result?;

    log::debug!(
        "encoded {}x{} {:?} into {written} of {budget} bytes",
        image.width,
        image.height,
        params.format
    );

    let mut bytes = out.data;
    bytes.truncate(written);
    Ok(EncodedFrame {
        bytes,
        began,
        begin_error,
    })
}
