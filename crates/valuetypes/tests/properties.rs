//! Property tests for the email value type.

#![allow(clippy::unwrap_used)]

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;

use valuetypes::{Email, Error};

/// ASCII strings with at least one `@`.
fn address() -> impl Strategy<Value = String> {
    ("[A-Za-z0-9._+-]{0,16}", "[A-Za-z0-9.-]{0,16}")
        .prop_map(|(local, domain)| format!("{local}@{domain}"))
}

/// ASCII strings that never contain `@`.
fn not_address() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._+ -]{0,32}"
}

fn hash_of(email: &Email) -> u64 {
    let mut hasher = DefaultHasher::new();
    email.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Case changes never affect identity.
    #[test]
    fn property_case_insensitive_equality(s in address()) {
        let lower = Email::new(&s).unwrap();
        let upper = Email::new(&s.to_ascii_uppercase()).unwrap();
        prop_assert_eq!(&lower, &upper);
        prop_assert_eq!(lower.cmp(&upper), Ordering::Equal);
    }

    /// PROPERTY: Equal values hash identically.
    #[test]
    fn property_hash_consistent_with_eq(s in address()) {
        let a = Email::new(&s).unwrap();
        let b = Email::new(&s.to_ascii_uppercase()).unwrap();
        prop_assert_eq!(hash_of(&a), hash_of(&b));
    }

    /// PROPERTY: Ordering is antisymmetric and transitive.
    #[test]
    fn property_total_order(a in address(), b in address(), c in address()) {
        let a = Email::new(&a).unwrap();
        let b = Email::new(&b).unwrap();
        let c = Email::new(&c).unwrap();

        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
        prop_assert_eq!(a.compare_any(None).unwrap(), Ordering::Greater);
    }

    /// PROPERTY: Strict construction rejects input without `@`.
    #[test]
    fn property_rejects_missing_at(s in not_address()) {
        prop_assert!(matches!(Email::new(&s), Err(Error::InvalidArgument(_))));
    }

    /// PROPERTY: Lenient parsing never fails and agrees with strict construction.
    #[test]
    fn property_try_parse_matches_new(s in ".{0,64}") {
        match Email::new(&s) {
            Ok(email) => prop_assert_eq!(Email::try_parse(Some(s.as_str())), Some(email)),
            Err(_) => {
                prop_assert_eq!(Email::try_parse(Some(s.as_str())), None);
                prop_assert_eq!(Email::parse_or_empty(Some(s.as_str())), Email::EMPTY);
            }
        }
    }

    /// PROPERTY: The canonical form survives a JSON round trip.
    #[test]
    fn property_json_round_trip(s in address()) {
        let email = Email::new(&s).unwrap();
        let json = serde_json::to_string(&email).unwrap();
        let read: Email = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(read, email);
    }

    /// PROPERTY: The canonical form survives a binary (non-self-describing) round trip.
    #[test]
    fn property_bincode_round_trip(s in address()) {
        let email = Email::new(&s).unwrap();
        let bytes = bincode::serialize(&email).unwrap();
        let read: Email = bincode::deserialize(&bytes).unwrap();
        prop_assert_eq!(read, email);
    }

    /// PROPERTY: Reading JSON never fails for well-formed documents.
    #[test]
    fn property_json_read_never_fails(n in any::<i64>(), b in any::<bool>(), s in ".{0,32}") {
        let values = [
            serde_json::json!(n),
            serde_json::json!(b),
            serde_json::json!(s),
            serde_json::json!([n, s]),
        ];
        for value in values {
            prop_assert!(serde_json::from_value::<Email>(value).is_ok());
        }
    }
}
