//! Email address value type.

use std::any::Any;
use std::cmp::Ordering;

use crate::error::{Error, Result};

/// Case-insensitive email address.
///
/// The stored form is lower-cased at construction, so equality, ordering and
/// hashing all operate on the folded text and agree with each other.
/// Only the presence of `@` is checked; no grammar validation is done.
///
/// Identity is defined by [`str::to_lowercase`]. Inputs that differ only in
/// ASCII case are always equal, but characters whose uppercase form expands
/// to several characters are not folded back: `ß@x` and `SS@X` are distinct
/// values (`ß@x` vs `ss@x`), as are `ﬁ@x` and `FI@X`.
///
/// [`Email::EMPTY`] is the "no email" sentinel. It holds an empty string and
/// is the only value without an `@`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Email(String);

impl Email {
    /// The "no email present" sentinel.
    pub const EMPTY: Self = Self(String::new());

    /// Creates a new email from a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `raw` does not contain `@`.
    pub fn new(raw: &str) -> Result<Self> {
        Self::validate(raw)?;
        Ok(Self::fold(raw))
    }

    /// Creates a new email from input that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `raw` is `None` or does not
    /// contain `@`.
    pub fn from_option(raw: Option<&str>) -> Result<Self> {
        match raw {
            Some(raw) => Self::new(raw),
            None => Err(Error::invalid_argument("value is missing")),
        }
    }

    /// Parses an email without failing.
    ///
    /// Returns `None` for absent input or input without `@`.
    #[must_use]
    pub fn try_parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        if Self::validate(raw).is_err() {
            return None;
        }
        Some(Self::fold(raw))
    }

    /// Parses an email, falling back to [`Email::EMPTY`].
    #[must_use]
    pub fn parse_or_empty(raw: Option<&str>) -> Self {
        Self::try_parse(raw).unwrap_or_else(|| {
            tracing::debug!(present = raw.is_some(), "Unparseable email, using empty");
            Self::EMPTY
        })
    }

    /// Returns true for the [`Email::EMPTY`] sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the canonical (lower-cased) address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares against an untyped value.
    ///
    /// An absent `other` ranks `self` as greater.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `other` is not an `Email`.
    pub fn compare_any(&self, other: Option<&dyn Any>) -> Result<Ordering> {
        let Some(other) = other else {
            return Ok(Ordering::Greater);
        };
        other
            .downcast_ref::<Self>()
            .map(|other| self.cmp(other))
            .ok_or(Error::TypeMismatch("Email"))
    }

    /// Checks the `@` requirement.
    fn validate(raw: &str) -> Result<()> {
        if !raw.contains('@') {
            return Err(Error::invalid_argument("value must contain '@'"));
        }
        Ok(())
    }

    fn fold(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl PartialEq<str> for Email {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.to_lowercase()
    }
}

impl PartialEq<&str> for Email {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_valid_address() {
        let email = Email::new("sl@dnmh.dk").unwrap();
        assert_eq!(email.as_str(), "sl@dnmh.dk");
        assert!(!email.is_empty());
    }

    #[test]
    fn test_lowercases_on_construction() {
        let email = Email::new("SL@DNMH.dk").unwrap();
        assert_eq!(email.as_str(), "sl@dnmh.dk");
        assert_eq!(email.to_string(), "sl@dnmh.dk");
    }

    #[test]
    fn test_case_insensitive_equality() {
        let lower = Email::new("sl@dnmh.dk").unwrap();
        let upper = Email::new("SL@dnmh.dk").unwrap();
        assert_eq!(lower, upper);

        let mut set = HashSet::new();
        set.insert(lower.clone());
        assert!(set.contains(&upper));
    }

    #[test]
    fn test_expanding_uppercase_is_distinct() {
        let sharp_s = Email::new("ß@x").unwrap();
        let upper = Email::new(&"ß@x".to_uppercase()).unwrap();
        assert_eq!(upper.as_str(), "ss@x");
        assert_ne!(sharp_s, upper);

        let ligature = Email::new("ﬁ@x").unwrap();
        assert_ne!(ligature, Email::new("FI@X").unwrap());
        assert_eq!(ligature, Email::new("ﬁ@X").unwrap());
    }

    #[test]
    fn test_invalid_address_no_at() {
        let err = Email::new("no-at-sign").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_address_missing() {
        let err = Email::from_option(None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_only_presence_of_at_is_checked() {
        assert!(Email::new("a@b").is_ok());
        assert!(Email::new("@").is_ok());
        assert!(Email::new("a@@b").is_ok());
    }

    #[test]
    fn test_from_option_present() {
        let email = Email::from_option(Some("A@B")).unwrap();
        assert_eq!(email.as_str(), "a@b");
    }

    #[test]
    fn test_try_parse() {
        assert_eq!(Email::try_parse(None), None);
        assert_eq!(Email::try_parse(Some("no-at-sign")), None);
        assert_eq!(Email::try_parse(Some("a@b")), Some(Email::new("a@b").unwrap()));
    }

    #[test]
    fn test_parse_or_empty() {
        assert_eq!(Email::parse_or_empty(None), Email::EMPTY);
        assert_eq!(Email::parse_or_empty(Some("")), Email::EMPTY);
        assert_eq!(Email::parse_or_empty(Some("no-at-sign")), Email::EMPTY);
        assert_eq!(Email::parse_or_empty(Some("A@b")).as_str(), "a@b");
    }

    #[test]
    fn test_empty_sentinel() {
        assert!(Email::EMPTY.is_empty());
        assert_eq!(Email::default(), Email::EMPTY);
        assert_eq!(Email::EMPTY.to_string(), "");
        assert_ne!(Email::EMPTY, Email::new("a@b").unwrap());
    }

    #[test]
    fn test_ordering() {
        let a = Email::new("Alice@example.com").unwrap();
        let b = Email::new("bob@example.com").unwrap();
        assert!(a < b);
        assert!(Email::EMPTY < a);
        assert_eq!(
            Email::new("X@y").unwrap().cmp(&Email::new("x@Y").unwrap()),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_any_absent() {
        let email = Email::new("a@b").unwrap();
        assert_eq!(email.compare_any(None).unwrap(), Ordering::Greater);
        assert_eq!(Email::EMPTY.compare_any(None).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_compare_any_same_type() {
        let a = Email::new("a@b").unwrap();
        let b = Email::new("B@b").unwrap();
        assert_eq!(a.compare_any(Some(&b as &dyn Any)).unwrap(), Ordering::Less);
        assert_eq!(b.compare_any(Some(&a as &dyn Any)).unwrap(), Ordering::Greater);
        let same = a.clone();
        assert_eq!(a.compare_any(Some(&same as &dyn Any)).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_compare_any_foreign_type() {
        let email = Email::new("a@b").unwrap();
        let other = String::from("a@b");
        let err = email.compare_any(Some(&other as &dyn Any)).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch("Email")));
    }

    #[test]
    fn test_eq_raw_text() {
        let email = Email::new("sl@dnmh.dk").unwrap();
        assert_eq!(email, "SL@DNMH.DK");
        assert!(email != "other@dnmh.dk");
    }

    #[test]
    fn test_into_string() {
        let email = Email::new("Sl@Dnmh.dk").unwrap();
        let text: String = email.into();
        assert_eq!(text, "sl@dnmh.dk");
    }
}
