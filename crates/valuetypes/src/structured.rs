//! Structured (serde) serialization for [`Email`].
//!
//! An [`Email`] is written as a single string token holding its canonical
//! form. Reading is lenient: any token that is not a string containing `@`
//! yields [`Email::EMPTY`] instead of an error, so one bad field does not
//! fail a whole document. Callers that care must check
//! [`Email::is_empty`].
//!
//! Non-self-describing formats (bincode and the like) cannot report the
//! token type, so there the value is read as a string directly. A string
//! without `@` still reads as [`Email::EMPTY`].

use std::any::TypeId;
use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::email::Email;
use crate::error::Result;

impl Serialize for Email {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(EmailVisitor)
        } else {
            deserializer.deserialize_str(EmailVisitor)
        }
    }
}

struct EmailVisitor;

impl EmailVisitor {
    fn fallback(kind: &'static str) -> Email {
        tracing::debug!(kind, "Non-string email token, using empty");
        Email::EMPTY
    }
}

impl<'de> Visitor<'de> for EmailVisitor {
    type Value = Email;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an email address string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Email, E> {
        Ok(Email::parse_or_empty(Some(v)))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> std::result::Result<Email, E> {
        Ok(Self::fallback("bool"))
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> std::result::Result<Email, E> {
        Ok(Self::fallback("integer"))
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> std::result::Result<Email, E> {
        Ok(Self::fallback("integer"))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> std::result::Result<Email, E> {
        Ok(Self::fallback("float"))
    }

    fn visit_bytes<E: de::Error>(self, _v: &[u8]) -> std::result::Result<Email, E> {
        Ok(Self::fallback("bytes"))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Email, E> {
        Ok(Self::fallback("null"))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Email, E> {
        Ok(Self::fallback("null"))
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Email, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Email, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Self::fallback("sequence"))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Email, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Self::fallback("map"))
    }
}

/// Returns true if `T` is handled by this converter.
#[must_use]
pub fn can_convert<T: 'static>() -> bool {
    TypeId::of::<T>() == TypeId::of::<Email>()
}

/// Writes an [`Email`] as a JSON string token.
#[must_use]
pub fn write(value: &Email) -> serde_json::Value {
    serde_json::Value::String(value.to_string())
}

/// Reads an [`Email`] from a JSON token.
///
/// Anything but a string containing `@` yields [`Email::EMPTY`].
#[must_use]
pub fn read(token: &serde_json::Value) -> Email {
    match token {
        serde_json::Value::String(text) => Email::parse_or_empty(Some(text.as_str())),
        other => {
            tracing::debug!(token = %other, "Non-string email token, using empty");
            Email::EMPTY
        }
    }
}

/// Serializes an [`Email`] to JSON text.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if serialization fails.
pub fn to_json(value: &Email) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Deserializes an [`Email`] from JSON text.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if `json` is not valid JSON. Valid JSON
/// that is not an email string yields [`Email::EMPTY`].
pub fn from_json(json: &str) -> Result<Email> {
    Ok(serde_json::from_str(json)?)
}
