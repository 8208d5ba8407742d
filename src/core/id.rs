//! Opaque external identifiers
//!
//! Rows are keyed by 64-bit integers in storage, but API clients only ever
//! see the opaque external form: the base-10 decimal text of the key. No
//! hashing or obfuscation is applied; the external identifier is a direct
//! textual projection of the primary key.
//!
//! [`ExternalId`] is the only bridge between the two forms. The service
//! layer converts scanned integers with [`ExternalId::from_internal`]
//! while decoding rows, so raw integer keys never travel past it. Client
//! input goes through [`ExternalId::decode`], which fails with
//! [`Error::MalformedIdentifier`] before any database call is made.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::core::error::{Error, Result};

/// Opaque external form of a row's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalId(i64);

impl ExternalId {
    /// Wrap an internal key as scanned from a row.
    pub fn from_internal(id: i64) -> Self {
        Self(id)
    }

    /// Parse a client-supplied identifier string.
    ///
    /// This is request validation, not a storage concern: callers must
    /// decode before building any query.
    pub fn decode(value: &str) -> Result<Self> {
        value
            .parse::<i64>()
            .map(Self)
            .map_err(|_| Error::MalformedIdentifier {
                value: value.to_string(),
            })
    }

    /// The internal key, for binding into SQL statements.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExternalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl Serialize for ExternalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_external_form() {
        for n in [0_i64, 1, 42, 999_999, i64::MAX] {
            let id = ExternalId::from_internal(n);
            let decoded = ExternalId::decode(&id.to_string()).unwrap();
            assert_eq!(decoded.as_i64(), n);
        }
    }

    #[test]
    fn encodes_as_decimal_text() {
        assert_eq!(ExternalId::from_internal(17).to_string(), "17");
        assert_eq!(ExternalId::from_internal(0).to_string(), "0");
    }

    #[test]
    fn rejects_non_numeric_input() {
        for bad in ["", "abc", "12x", "12.5", " 7", "7 ", "0x10"] {
            let err = ExternalId::decode(bad).unwrap_err();
            assert_eq!(err.error_code(), "MALFORMED_IDENTIFIER", "input: {:?}", bad);
        }
    }

    #[test]
    fn rejects_overflowing_input() {
        // One past i64::MAX
        let err = ExternalId::decode("9223372036854775808").unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_IDENTIFIER");
    }

    #[test]
    fn serializes_as_a_json_string() {
        let json = serde_json::to_string(&ExternalId::from_internal(5)).unwrap();
        assert_eq!(json, "\"5\"");
    }
}
