//! Field-keyed legacy record and its binary encoding.
//!
//! Layout (all integers big-endian):
//!
//! ```text
//! "VTR" version:u8 count:u16
//! count * ( name_len:u16 name tag:u8 payload_len:u32 payload )
//! ```
//!
//! Every payload is length-prefixed, so a reader can skip value tags it does
//! not know. Such fields decode with an absent value.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Error, Result};

const MAGIC: &[u8; 3] = b"VTR";
const VERSION: u8 = 1;

const TAG_ABSENT: u8 = 0;
const TAG_TEXT: u8 = 1;
const TAG_INTEGER: u8 = 2;
const TAG_BOOLEAN: u8 = 3;

/// Value stored in a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// UTF-8 text.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Boolean flag.
    Boolean(bool),
}

impl FieldValue {
    /// Coerces the value to text.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// Ordered list of named fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<FieldValue>)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. `None` stores a field without a value.
    pub fn push(&mut self, name: impl Into<String>, value: Option<FieldValue>) {
        self.fields.push((name.into(), value));
    }

    /// Appends a field holding `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.push(name, Some(value.into()));
        self
    }

    /// Iterates fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encodes the record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the record has more than 65535 fields,
    /// or a name or payload too long for its length prefix.
    pub fn encode(&self) -> Result<Bytes> {
        let count = u16::try_from(self.len())
            .map_err(|_| Error::malformed("too many fields"))?;

        let mut buf = BytesMut::new();
        buf.put_slice(MAGIC);
        buf.put_u8(VERSION);
        buf.put_u16(count);

        for (name, value) in &self.fields {
            let name_len = u16::try_from(name.len()).map_err(|_| {
                Error::malformed(format!("field name too long: {} bytes", name.len()))
            })?;
            buf.put_u16(name_len);
            buf.put_slice(name.as_bytes());

            match value {
                None => put_payload(&mut buf, TAG_ABSENT, &[])?,
                Some(FieldValue::Text(text)) => {
                    put_payload(&mut buf, TAG_TEXT, text.as_bytes())?;
                }
                Some(FieldValue::Integer(n)) => {
                    put_payload(&mut buf, TAG_INTEGER, &n.to_be_bytes())?;
                }
                Some(FieldValue::Boolean(b)) => {
                    put_payload(&mut buf, TAG_BOOLEAN, &[u8::from(*b)])?;
                }
            }
        }

        Ok(buf.freeze())
    }

    /// Decodes a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] on a bad header, truncated input,
    /// invalid UTF-8, a wrongly sized integer or boolean payload, or trailing
    /// bytes.
    pub fn decode(mut input: &[u8]) -> Result<Self> {
        let magic = take(&mut input, MAGIC.len(), "magic")?;
        if magic != MAGIC {
            return Err(Error::malformed("bad magic"));
        }
        let version = take(&mut input, 1, "version")?.get_u8();
        if version != VERSION {
            return Err(Error::malformed(format!("unsupported version {version}")));
        }
        let count = take(&mut input, 2, "field count")?.get_u16();

        let mut record = Self::new();
        for _ in 0..count {
            let name_len = take(&mut input, 2, "name length")?.get_u16();
            let name = take(&mut input, usize::from(name_len), "name")?;
            let name = std::str::from_utf8(name)
                .map_err(|_| Error::malformed("field name is not UTF-8"))?;

            let tag = take(&mut input, 1, "value tag")?.get_u8();
            let payload_len = take(&mut input, 4, "payload length")?.get_u32();
            let payload_len = usize::try_from(payload_len)
                .map_err(|_| Error::malformed("payload too large"))?;
            let payload = take(&mut input, payload_len, "payload")?;

            let value = decode_value(name, tag, payload)?;
            record.push(name, value);
        }

        if !input.is_empty() {
            return Err(Error::malformed(format!("{} trailing bytes", input.len())));
        }
        Ok(record)
    }
}

fn put_payload(buf: &mut BytesMut, tag: u8, payload: &[u8]) -> Result<()> {
    let len = u32::try_from(payload.len())
        .map_err(|_| Error::malformed(format!("payload too long: {} bytes", payload.len())))?;
    buf.put_u8(tag);
    buf.put_u32(len);
    buf.put_slice(payload);
    Ok(())
}

fn decode_value(name: &str, tag: u8, mut payload: &[u8]) -> Result<Option<FieldValue>> {
    let value = match tag {
        TAG_ABSENT => None,
        TAG_TEXT => {
            let text = std::str::from_utf8(payload)
                .map_err(|_| Error::malformed(format!("field `{name}` is not UTF-8")))?;
            Some(FieldValue::Text(text.to_string()))
        }
        TAG_INTEGER if payload.len() == 8 => Some(FieldValue::Integer(payload.get_i64())),
        TAG_BOOLEAN if payload.len() == 1 => Some(FieldValue::Boolean(payload.get_u8() != 0)),
        TAG_INTEGER | TAG_BOOLEAN => {
            return Err(Error::malformed(format!(
                "field `{name}` has a {} byte payload for tag {tag}",
                payload.len()
            )));
        }
        unknown => {
            tracing::trace!(field = name, tag = unknown, "Skipping unknown value tag");
            None
        }
    };
    Ok(value)
}

/// Splits `n` bytes off the front of `input`.
fn take<'a>(input: &mut &'a [u8], n: usize, what: &str) -> Result<&'a [u8]> {
    if input.len() < n {
        return Err(Error::malformed(format!(
            "truncated {what}: need {n} bytes, have {}",
            input.len()
        )));
    }
    let (head, tail) = input.split_at(n);
    *input = tail;
    Ok(head)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let mut record = Record::new()
            .with("email", "sl@dnmh.dk")
            .with("version", 3_i64)
            .with("verified", true);
        record.push("note", None);
        record
    }

    #[test]
    fn test_fields_in_order() {
        let record = sample();
        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["email", "version", "verified", "note"]);
        assert_eq!(record.len(), 4);
        assert!(!record.is_empty());
        assert!(Record::new().is_empty());
    }

    #[test]
    fn test_encode_layout() {
        let bytes = Record::new().with("a", "x").encode().unwrap();
        assert_eq!(
            bytes.as_ref(),
            [b'V', b'T', b'R', 1, 0, 1, 0, 1, b'a', 1, 0, 0, 0, 1, b'x']
        );
    }

    #[test]
    fn test_decode_encoded() {
        let record = sample();
        let decoded = Record::decode(&record.encode().unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_decode_skips_unknown_tag() {
        let bytes = [b'V', b'T', b'R', 1, 0, 1, 0, 1, b'z', 9, 0, 0, 0, 2, 0xAB, 0xCD];
        let record = Record::decode(&bytes).unwrap();
        let fields: Vec<_> = record.fields().collect();
        assert_eq!(fields, [("z", None)]);
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let err = Record::decode(b"XXX\x01\x00\x00").unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let err = Record::decode(b"VTR\x02\x00\x00").unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn test_decode_rejects_truncated() {
        let bytes = sample().encode().unwrap();
        for len in 0..bytes.len() {
            assert!(Record::decode(&bytes[..len]).is_err(), "prefix of {len} bytes");
        }
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = sample().encode().unwrap().to_vec();
        bytes.push(0);
        assert!(Record::decode(&bytes).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_integer_payload() {
        let bytes = [b'V', b'T', b'R', 1, 0, 1, 0, 1, b'n', TAG_INTEGER, 0, 0, 0, 1, 7];
        assert!(matches!(Record::decode(&bytes), Err(Error::Malformed(_))));
    }

    #[test]
    fn test_field_value_to_text() {
        assert_eq!(FieldValue::from("a@b").to_text(), "a@b");
        assert_eq!(FieldValue::from(-5_i64).to_text(), "-5");
        assert_eq!(FieldValue::from(false).to_text(), "false");
    }
}
