//! # valuetypes
//!
//! A validated, case-insensitive email address value type.
//!
//! ## Features
//!
//! - **Case-insensitive identity**: addresses are lower-cased on construction,
//!   so equality, ordering and hashing agree
//! - **Strict and lenient entry points**: [`Email::new`] fails fast,
//!   [`Email::try_parse`] and [`Email::parse_or_empty`] never fail
//! - **Text binding**: `FromStr`/`TryFrom` and a [`TextConverter`] for
//!   configuration layers
//! - **Serde**: serialized as a plain string; malformed input reads as
//!   [`Email::EMPTY`]
//! - **Legacy records**: field-keyed, forward-compatible encoding (feature
//!   `legacy`, enabled by default)
//!
//! ## Quick Start
//!
//! ```
//! use valuetypes::Email;
//!
//! # fn main() -> valuetypes::Result<()> {
//! let a = Email::new("SL@dnmh.dk")?;
//! let b: Email = "sl@DNMH.dk".parse()?;
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "sl@dnmh.dk");
//!
//! assert!(Email::new("no-at-sign").is_err());
//! assert_eq!(Email::parse_or_empty(Some("no-at-sign")), Email::EMPTY);
//!
//! let json = serde_json::to_string(&a)?;
//! assert_eq!(json, r#""sl@dnmh.dk""#);
//! # Ok(())
//! # }
//! ```
//!
//! Only the presence of `@` is checked. Address grammar, deliverability and
//! internationalized domains are out of scope.
//!
//! ## Modules
//!
//! - [`text`]: configuration binding
//! - [`structured`]: serde support and JSON token helpers
//! - [`legacy`]: field-keyed record format

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod email;
mod error;
#[cfg(feature = "legacy")]
pub mod legacy;
pub mod structured;
pub mod text;

pub use email::Email;
pub use error::{Error, Result};
#[cfg(feature = "legacy")]
pub use legacy::{FieldValue, LegacyConverter, Record};
pub use text::{BindingValue, SourceKind, TextConverter};
