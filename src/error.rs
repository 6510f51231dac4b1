use alloc::string::String;
use enough::StopReason;

/// Errors from BMP loading, normalization and encoder driving.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a Windows BMP file")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("not a {expected}-bit BMP (found {actual} bits per pixel)")]
    UnexpectedBitDepth { expected: u32, actual: u32 },

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("encoder error: {0}")]
    Encoder(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Coarse classification of a [`BmpError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Source unreadable or destination unwritable.
    Io,
    /// Not a recognizable (or not a well-formed) BMP.
    Format,
    /// A recognizable BMP this crate deliberately does not handle.
    UnsupportedFormat,
    /// A caller-supplied [`crate::Limits`] bound was hit.
    Limit,
    /// The block encoder rejected a frame.
    Encoder,
    /// The caller's [`enough::Stop`] fired.
    Cancelled,
}

impl BmpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(feature = "std")]
            Self::Io(_) => ErrorKind::Io,
            Self::UnrecognizedFormat
            | Self::InvalidHeader(_)
            | Self::UnexpectedBitDepth { .. }
            | Self::DimensionsTooLarge { .. }
            | Self::UnexpectedEof
            | Self::BufferTooSmall { .. } => ErrorKind::Format,
            Self::UnsupportedVariant(_) => ErrorKind::UnsupportedFormat,
            Self::LimitExceeded(_) => ErrorKind::Limit,
            Self::Encoder(_) => ErrorKind::Encoder,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(BmpError::UnrecognizedFormat.kind(), ErrorKind::Format);
        assert_eq!(
            BmpError::UnexpectedBitDepth {
                expected: 16,
                actual: 24
            }
            .kind(),
            ErrorKind::Format
        );
        assert_eq!(
            BmpError::UnsupportedVariant("palette".into()).kind(),
            ErrorKind::UnsupportedFormat
        );
    }

    #[test]
    fn bit_depth_message() {
        let e = BmpError::UnexpectedBitDepth {
            expected: 16,
            actual: 32,
        };
        assert_eq!(
            alloc::format!("{e}"),
            "not a 16-bit BMP (found 32 bits per pixel)"
        );
    }
}
