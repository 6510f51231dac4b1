use crate::error::BmpError;

/// Resource limits for load/normalize operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the normalized buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_dimensions(mut self, width: u64, height: u64) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    pub fn with_max_memory_bytes(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    /// Check image dimensions and the size of the buffer about to be allocated.
    pub(crate) fn check(
        &self,
        width: u32,
        height: u32,
        alloc_bytes: usize,
    ) -> Result<(), BmpError> {
        ensure_within("width", u64::from(width), self.max_width)?;
        ensure_within("height", u64::from(height), self.max_height)?;
        ensure_within(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )?;
        ensure_within("allocation", alloc_bytes as u64, self.max_memory_bytes)
    }
}

fn ensure_within(what: &str, value: u64, max: Option<u64>) -> Result<(), BmpError> {
    match max {
        Some(max) if value > max => Err(BmpError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
