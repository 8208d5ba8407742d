//! Argument decoding
//!
//! Converts GraphQL literal values to JSON, resolving `$variable`
//! references against the request's variables map. Typed helpers pull
//! individual arguments off a field; identifier-typed arguments accept
//! both string and integer literals, per GraphQL `ID` coercion.

use std::collections::HashMap;

use graphql_parser::query::{Field, Value as GqlValue};
use serde_json::{Value as Json, json};

use crate::core::{Error, Result};

/// The client's variables map.
pub type Variables = HashMap<String, Json>;

/// Convert a GraphQL value to JSON, resolving variables.
pub fn to_json(value: &GqlValue<'_, String>, variables: &Variables) -> Result<Json> {
    match value {
        GqlValue::Variable(name) => variables.get(name).cloned().ok_or_else(|| {
            Error::BadQuery(format!("variable '${}' is not defined", name))
        }),
        GqlValue::Int(n) => Ok(json!(n.as_i64().unwrap_or(0))),
        GqlValue::Float(f) => Ok(json!(f)),
        GqlValue::String(s) => Ok(json!(s)),
        GqlValue::Boolean(b) => Ok(json!(b)),
        GqlValue::Null => Ok(Json::Null),
        GqlValue::Enum(e) => Ok(json!(e)),
        GqlValue::List(items) => Ok(Json::Array(
            items
                .iter()
                .map(|item| to_json(item, variables))
                .collect::<Result<Vec<_>>>()?,
        )),
        GqlValue::Object(object) => {
            let mut map = serde_json::Map::new();
            for (key, item) in object {
                map.insert(key.clone(), to_json(item, variables)?);
            }
            Ok(Json::Object(map))
        }
    }
}

/// An argument's resolved value, if present.
pub fn argument(
    field: &Field<'_, String>,
    name: &str,
    variables: &Variables,
) -> Result<Option<Json>> {
    field
        .arguments
        .iter()
        .find(|(arg_name, _)| arg_name == name)
        .map(|(_, value)| to_json(value, variables))
        .transpose()
}

/// An identifier-typed argument; integer literals coerce to their decimal
/// text.
pub fn id_argument(
    field: &Field<'_, String>,
    name: &str,
    variables: &Variables,
) -> Result<Option<String>> {
    match argument(field, name, variables)? {
        None | Some(Json::Null) => Ok(None),
        Some(Json::String(s)) => Ok(Some(s)),
        Some(Json::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(Error::BadQuery(format!(
            "argument '{}' must be an ID, got {}",
            name, other
        ))),
    }
}

/// A required identifier-typed argument.
pub fn require_id(field: &Field<'_, String>, name: &str, variables: &Variables) -> Result<String> {
    id_argument(field, name, variables)?.ok_or_else(|| {
        Error::BadQuery(format!("missing required argument '{}'", name))
    })
}

/// A string-typed argument, if present.
pub fn string_argument(
    field: &Field<'_, String>,
    name: &str,
    variables: &Variables,
) -> Result<Option<String>> {
    match argument(field, name, variables)? {
        None | Some(Json::Null) => Ok(None),
        Some(Json::String(s)) => Ok(Some(s)),
        Some(other) => Err(Error::BadQuery(format!(
            "argument '{}' must be a string, got {}",
            name, other
        ))),
    }
}
