//! Error types for value construction and conversion.

use crate::text::SourceKind;

/// Result type alias for value type operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Value type error kinds.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input was absent or is not an acceptable email address.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Polymorphic comparison against a value of another type.
    #[error("Type mismatch: expected {0}")]
    TypeMismatch(&'static str),

    /// A required field was absent from a legacy record.
    #[error("Missing data: no `{0}` field in record")]
    MissingData(&'static str),

    /// The text binding layer cannot convert from this kind of value.
    #[error("Cannot convert from {0} source")]
    UnsupportedSource(SourceKind),

    /// Legacy record bytes could not be decoded.
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// JSON text could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Creates a malformed record error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::invalid_argument("value must contain '@'");
        assert_eq!(err.to_string(), "Invalid argument: value must contain '@'");

        let err = Error::MissingData("email");
        assert_eq!(err.to_string(), "Missing data: no `email` field in record");

        let err = Error::UnsupportedSource(SourceKind::Integer);
        assert_eq!(err.to_string(), "Cannot convert from integer source");
    }
}
