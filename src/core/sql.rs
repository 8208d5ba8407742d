//! Conditional SELECT construction
//!
//! Entity services filter on arbitrary subsets of their columns: every
//! present filter field contributes one `AND column = ?` predicate, absent
//! fields contribute nothing, and zero present fields leave the base
//! statement as a full-table scan. [`SelectBuilder`] accumulates the
//! predicates and their bind values so the rendered statement only ever
//! interpolates column names from the services' fixed lists; client
//! values are bound positionally, never spliced into the SQL text.

use sqlx::Arguments;
use sqlx::mysql::MySqlArguments;

use crate::core::error::{Error, Result};

/// A value to bind positionally into a rendered statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Int(i64),
    Text(String),
}

impl Bind {
    fn add_to(self, arguments: &mut MySqlArguments) -> Result<()> {
        let added = match self {
            Bind::Int(v) => arguments.add(v),
            Bind::Text(v) => arguments.add(v),
        };
        added.map_err(|e| Error::Storage(sqlx::Error::Encode(e)))
    }
}

impl From<i64> for Bind {
    fn from(v: i64) -> Self {
        Bind::Int(v)
    }
}

impl From<String> for Bind {
    fn from(v: String) -> Self {
        Bind::Text(v)
    }
}

impl From<&str> for Bind {
    fn from(v: &str) -> Self {
        Bind::Text(v.to_string())
    }
}

/// Accumulates equality predicates on top of a base SELECT.
///
/// The base statement must already carry its WHERE clause (the services use
/// `WHERE 1 = 1` so appended predicates compose uniformly). `column` must
/// come from a fixed trusted list in the calling service, never from client
/// input.
#[derive(Debug)]
pub struct SelectBuilder {
    sql: String,
    binds: Vec<Bind>,
}

impl SelectBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            sql: base.into(),
            binds: Vec::new(),
        }
    }

    /// Append one `AND column = ?` predicate and queue its bind value.
    pub fn and_eq(&mut self, column: &str, value: impl Into<Bind>) {
        self.sql.push_str(" AND ");
        self.sql.push_str(column);
        self.sql.push_str(" = ?");
        self.binds.push(value.into());
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[Bind] {
        &self.binds
    }

    /// Finish building: the rendered statement plus its bind values packed
    /// as MySQL arguments, in render order. Feed the pair to
    /// `sqlx::query_as_with`.
    pub fn build(self) -> Result<(String, MySqlArguments)> {
        let mut arguments = MySqlArguments::default();
        for bind in self.binds {
            bind.add_to(&mut arguments)?;
        }
        Ok((self.sql, arguments))
    }
}
