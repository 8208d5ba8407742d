//! Typed error handling for pressgraph
//!
//! One error type covers the whole crate. The variants mirror how failures
//! surface at the query boundary:
//!
//! - [`Error::MalformedIdentifier`]: a client-supplied identifier is not
//!   decodable; rejected before any database call
//! - [`Error::UnsupportedField`]: a lookup-by-field request named a field
//!   outside the allow-list; rejected before query construction
//! - [`Error::NotFound`]: a single-row lookup matched zero rows
//! - [`Error::Storage`]: the database connection or statement execution
//!   failed
//! - [`Error::BadQuery`]: the query text could not be parsed or did not
//!   match the schema declaration
//! - [`Error::Schema`]: the schema declaration itself is unusable; the only
//!   variant allowed to abort startup
//!
//! Every variant carries a stable [`Error::error_code`] so the boundary can
//! expose the category in GraphQL error extensions without clients parsing
//! messages.

use std::fmt;

/// The main error type for pressgraph.
#[derive(Debug)]
pub enum Error {
    /// A client-supplied external identifier is not a base-10 integer.
    MalformedIdentifier { value: String },

    /// A lookup-by-field request used a field outside the allow-list.
    UnsupportedField { field: String },

    /// A single-row lookup matched zero rows.
    NotFound { entity: &'static str, id: String },

    /// Database connection or statement execution failed.
    Storage(sqlx::Error),

    /// The query text failed to parse or did not match the schema.
    BadQuery(String),

    /// The schema declaration failed to parse.
    Schema(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedIdentifier { value } => {
                write!(f, "malformed identifier '{}'", value)
            }
            Error::UnsupportedField { field } => {
                write!(f, "field '{}' is not accepted", field)
            }
            Error::NotFound { entity, id } => {
                write!(f, "{} with id '{}' not found", entity, id)
            }
            Error::Storage(e) => write!(f, "storage error: {}", e),
            Error::BadQuery(msg) => write!(f, "invalid query: {}", msg),
            Error::Schema(msg) => write!(f, "invalid schema: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// Stable code for the error category, exposed in GraphQL error
    /// extensions.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::MalformedIdentifier { .. } => "MALFORMED_IDENTIFIER",
            Error::UnsupportedField { .. } => "UNSUPPORTED_FIELD",
            Error::NotFound { .. } => "NOT_FOUND",
            Error::Storage(_) => "STORAGE_ERROR",
            Error::BadQuery(_) => "BAD_QUERY",
            Error::Schema(_) => "SCHEMA_ERROR",
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Storage(err)
    }
}
