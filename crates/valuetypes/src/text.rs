//! Text and configuration binding for [`Email`].
//!
//! Configuration layers hand values over as a [`BindingValue`]. The
//! [`TextConverter`] turns text into an [`Email`] through the strict
//! constructor, and formats an [`Email`] back into text.

use std::str::FromStr;

use crate::email::Email;
use crate::error::{Error, Result};

/// Kind of a [`BindingValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// No value.
    Null,
    /// Plain text.
    Text,
    /// An already constructed [`Email`].
    Email,
    /// Signed integer.
    Integer,
    /// Floating point number.
    Float,
    /// Boolean flag.
    Boolean,
}

impl SourceKind {
    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text => "text",
            Self::Email => "email",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration value as seen by the binding layer.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingValue {
    /// No value.
    Null,
    /// Plain text.
    Text(String),
    /// An already constructed email.
    Email(Email),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean flag.
    Boolean(bool),
}

impl BindingValue {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Null => SourceKind::Null,
            Self::Text(_) => SourceKind::Text,
            Self::Email(_) => SourceKind::Email,
            Self::Integer(_) => SourceKind::Integer,
            Self::Float(_) => SourceKind::Float,
            Self::Boolean(_) => SourceKind::Boolean,
        }
    }
}

impl From<Email> for BindingValue {
    fn from(email: Email) -> Self {
        Self::Email(email)
    }
}

impl From<&str> for BindingValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for BindingValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Converts configuration values to and from [`Email`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextConverter;

impl TextConverter {
    /// Returns true if values of `kind` can be converted into an [`Email`].
    #[must_use]
    pub const fn can_convert_from(kind: SourceKind) -> bool {
        matches!(kind, SourceKind::Text | SourceKind::Email)
    }

    /// Converts a configuration value into an [`Email`].
    ///
    /// Text goes through [`Email::new`]; an [`Email`] is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for text without `@`, or
    /// [`Error::UnsupportedSource`] for any other kind of value.
    pub fn convert_from(value: BindingValue) -> Result<Email> {
        match value {
            BindingValue::Text(text) => Email::new(&text),
            BindingValue::Email(email) => Ok(email),
            other => Err(Error::UnsupportedSource(other.kind())),
        }
    }

    /// Formats an [`Email`] as a text configuration value.
    #[must_use]
    pub fn convert_to(value: &Email) -> BindingValue {
        BindingValue::Text(value.to_string())
    }
}

impl FromStr for Email {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Email {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for Email {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_can_convert_from() {
        assert!(TextConverter::can_convert_from(SourceKind::Text));
        assert!(TextConverter::can_convert_from(SourceKind::Email));
        assert!(!TextConverter::can_convert_from(SourceKind::Integer));
        assert!(!TextConverter::can_convert_from(SourceKind::Float));
        assert!(!TextConverter::can_convert_from(SourceKind::Boolean));
        assert!(!TextConverter::can_convert_from(SourceKind::Null));
    }

    #[test]
    fn test_convert_from_text() {
        let email = TextConverter::convert_from("SL@dnmh.dk".into()).unwrap();
        assert_eq!(email.as_str(), "sl@dnmh.dk");
    }

    #[test]
    fn test_convert_from_text_is_strict() {
        let err = TextConverter::convert_from("no-at-sign".into()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = TextConverter::convert_from(BindingValue::Text(String::new())).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_convert_from_email_passes_through() {
        let email = Email::new("a@b").unwrap();
        let converted = TextConverter::convert_from(email.clone().into()).unwrap();
        assert_eq!(converted, email);
    }

    #[test]
    fn test_convert_from_unsupported() {
        for value in [
            BindingValue::Null,
            BindingValue::Integer(42),
            BindingValue::Float(1.5),
            BindingValue::Boolean(true),
        ] {
            let kind = value.kind();
            let err = TextConverter::convert_from(value).unwrap_err();
            assert!(matches!(err, Error::UnsupportedSource(k) if k == kind));
        }
    }

    #[test]
    fn test_convert_to() {
        let email = Email::new("Sl@Dnmh.dk").unwrap();
        assert_eq!(
            TextConverter::convert_to(&email),
            BindingValue::Text("sl@dnmh.dk".to_string())
        );
        assert_eq!(
            TextConverter::convert_to(&Email::EMPTY),
            BindingValue::Text(String::new())
        );
    }

    #[test]
    fn test_from_str() {
        let email: Email = "A@B".parse().unwrap();
        assert_eq!(email.as_str(), "a@b");
        assert!("nope".parse::<Email>().is_err());
    }

    #[test]
    fn test_try_from() {
        assert!(Email::try_from("a@b").is_ok());
        assert!(Email::try_from(String::from("a@b")).is_ok());
        assert!(Email::try_from("ab").is_err());
    }
}
