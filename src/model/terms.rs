//! Taxonomy records: terms, term taxonomy, term relationships

use super::MetaRecord;
use crate::core::ExternalId;

/// One row of `{prefix}terms`, plus its eager-fetched meta rows.
#[derive(Debug, Clone)]
pub struct TermRecord {
    pub id: ExternalId,
    pub name: String,
    pub slug: String,
    pub group: ExternalId,
    pub meta: Vec<MetaRecord>,
}

/// One row of `{prefix}term_taxonomy` joined with its owning term.
///
/// `parent` is `"0"` for top-level taxonomy entries.
#[derive(Debug, Clone)]
pub struct TermTaxonomyRecord {
    pub id: ExternalId,
    pub term_id: ExternalId,
    pub taxonomy: String,
    pub description: String,
    pub parent: ExternalId,
    pub count: u64,
    pub term: TermRecord,
}

/// One row of `{prefix}term_relationships`.
///
/// Joins a post-like object to a term-taxonomy entry; `(object_id,
/// term_taxonomy_id)` is conceptually unique.
#[derive(Debug, Clone)]
pub struct TermRelationshipRecord {
    pub object_id: ExternalId,
    pub term_taxonomy_id: ExternalId,
    pub order: i64,
}
