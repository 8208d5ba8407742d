//! Core building blocks: error taxonomy, identifier codec, SQL composition

pub mod error;
pub mod id;
pub mod sql;

pub use error::{Error, Result};
pub use id::ExternalId;
pub use sql::{Bind, SelectBuilder};
