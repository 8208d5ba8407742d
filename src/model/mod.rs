//! Entity records: plain data holders for each table's columns
//!
//! Records are constructed by the service layer and read-only afterwards.
//! Identifier fields are stored in external form ([`ExternalId`]); raw
//! integer keys never appear here. Each meta-bearing record carries its
//! metadata rows, eagerly fetched at decode time.

pub mod comments;
pub mod links;
pub mod options;
pub mod post;
pub mod terms;
pub mod user;

pub use comments::CommentRecord;
pub use links::LinkRecord;
pub use options::OptionRecord;
pub use post::{PostInput, PostRecord};
pub use terms::{TermRecord, TermRelationshipRecord, TermTaxonomyRecord};
pub use user::UserRecord;

use crate::core::ExternalId;

/// One row of a meta table.
///
/// The four meta tables (`usermeta`, `postmeta`, `termmeta`, `commentmeta`)
/// share this shape; only the physical column names differ. Keys are not
/// unique; an owner may carry several rows with the same key.
#[derive(Debug, Clone)]
pub struct MetaRecord {
    pub meta_id: ExternalId,
    pub owner_id: ExternalId,
    pub key: String,
    pub value: String,
}
