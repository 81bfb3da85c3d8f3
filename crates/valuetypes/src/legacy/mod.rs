//! Legacy field-keyed serialization for [`Email`].
//!
//! A value is stored as a [`Record`] with a single `email` field. Readers
//! ignore fields they do not recognize, so newer writers can add fields
//! without breaking older readers.

mod record;

pub use record::{FieldValue, Record};

use bytes::Bytes;

use crate::email::Email;
use crate::error::{Error, Result};

/// Name of the field holding the canonical address.
pub const EMAIL_FIELD: &str = "email";

/// Converts [`Email`] values to and from legacy records.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyConverter;

impl LegacyConverter {
    /// Writes `value` into `sink` as the `email` field.
    pub fn serialize(value: &Email, sink: &mut Record) {
        sink.push(EMAIL_FIELD, Some(FieldValue::Text(value.to_string())));
    }

    /// Reads an [`Email`] from a record.
    ///
    /// The `email` value is coerced to text, with an absent value read as
    /// empty text. Empty text yields [`Email::EMPTY`]; anything else goes
    /// through [`Email::new`]. If the field repeats, the last one wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingData`] if the record has no `email` field, or
    /// [`Error::InvalidArgument`] if its text does not contain `@`.
    pub fn deserialize(source: &Record) -> Result<Email> {
        if source.is_empty() {
            return Err(Error::MissingData(EMAIL_FIELD));
        }
        tracing::trace!(fields = source.len(), "Reading legacy record");

        let mut text = None;
        for (name, value) in source.fields() {
            if name == EMAIL_FIELD {
                text = Some(value.map(FieldValue::to_text).unwrap_or_default());
            } else {
                tracing::trace!(field = name, "Ignoring unknown legacy field");
            }
        }

        let text = text.ok_or(Error::MissingData(EMAIL_FIELD))?;
        if text.is_empty() {
            return Ok(Email::EMPTY);
        }
        Email::new(&text)
    }

    /// Serializes `value` into encoded record bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the address is too long to encode.
    pub fn to_bytes(value: &Email) -> Result<Bytes> {
        let mut record = Record::new();
        Self::serialize(value, &mut record);
        record.encode()
    }

    /// Deserializes an [`Email`] from encoded record bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the bytes are not a valid record, plus
    /// the errors of [`LegacyConverter::deserialize`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Email> {
        let record = Record::decode(bytes)?;
        Self::deserialize(&record)
    }
}
