//! The query execution boundary
//!
//! Thin plumbing around the resolver graph: parse the client's query text,
//! check the requested root fields against the schema declaration loaded at
//! startup, then walk the selection tree depth-first, invoking the root
//! resolver and nested resolvers and marshaling results into JSON.
//!
//! Failures isolate per field: an error anywhere inside one root field's
//! subtree nulls that field and appends one entry to `errors`; sibling root
//! fields are unaffected.

pub mod executor;
pub mod schema;
pub mod value;

pub use executor::Executor;
pub use schema::SchemaIndex;
pub use value::Variables;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::core::Error;

/// One client request as decoded from the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(default, rename = "operationName")]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: Option<Variables>,
}

/// The execution result sent back to the client.
#[derive(Debug, Serialize)]
pub struct GraphqlResponse {
    pub data: Json,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl GraphqlResponse {
    /// A request-level failure: nothing executed, one error entry.
    pub(crate) fn failure(err: Error) -> Self {
        Self {
            data: Json::Null,
            errors: vec![FieldError::new(err, Vec::new())],
        }
    }
}

/// One per-field error entry.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    pub extensions: FieldErrorExtensions,
}

#[derive(Debug, Serialize)]
pub struct FieldErrorExtensions {
    pub code: &'static str,
}

impl FieldError {
    pub(crate) fn new(err: Error, path: Vec<String>) -> Self {
        Self {
            message: err.to_string(),
            path,
            extensions: FieldErrorExtensions {
                code: err.error_code(),
            },
        }
    }
}
