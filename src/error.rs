use alloc::string::String;

/// Why a conversion was rejected.
///
/// The set is closed: argument errors are the caller's fault, format errors
/// name a tag outside the seven known layouts, and resource errors come from
/// the host surface (allocation or locking).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// Malformed call-site input: bad layout or weights length, zero
    /// dimensions, a stride too small for the row, or a short buffer.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The format tag is not one of the recognized source formats.
    #[error("unsupported image format: {0:?}")]
    UnsupportedFormat(String),

    /// A pixel surface could not be allocated or locked.
    #[error("pixel surface unavailable: {0}")]
    ResourceUnavailable(&'static str),
}

impl ConvertError {
    /// `true` for [`ConvertError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// `true` for [`ConvertError::UnsupportedFormat`].
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_))
    }

    /// `true` for [`ConvertError::ResourceUnavailable`].
    pub fn is_resource_unavailable(&self) -> bool {
        matches!(self, Self::ResourceUnavailable(_))
    }
}

pub type Result<T> = core::result::Result<T, ConvertError>;
