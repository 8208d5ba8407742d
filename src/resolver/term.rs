//! Taxonomy resolvers

use crate::core::ExternalId;
use crate::model::{MetaRecord, TermRecord, TermTaxonomyRecord};

/// Resolver for one `term_taxonomy` entry.
///
/// The owning term travels inside the record (the service always reads
/// through the join), so `term()` is a direct accessor, not a lookup.
pub struct TermTaxonomyResolver {
    record: TermTaxonomyRecord,
}

impl TermTaxonomyResolver {
    pub fn new(record: TermTaxonomyRecord) -> Self {
        Self { record }
    }

    pub fn term_taxonomy_id(&self) -> &ExternalId {
        &self.record.id
    }

    pub fn term_id(&self) -> &ExternalId {
        &self.record.term_id
    }

    pub fn taxonomy(&self) -> &str {
        &self.record.taxonomy
    }

    pub fn description(&self) -> &str {
        &self.record.description
    }

    pub fn parent_id(&self) -> &ExternalId {
        &self.record.parent
    }

    pub fn count(&self) -> u64 {
        self.record.count
    }

    pub fn term(&self) -> TermResolver {
        TermResolver::new(self.record.term.clone())
    }
}

/// Resolver for one term row.
pub struct TermResolver {
    record: TermRecord,
}

impl TermResolver {
    pub fn new(record: TermRecord) -> Self {
        Self { record }
    }

    pub fn term_id(&self) -> &ExternalId {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn slug(&self) -> &str {
        &self.record.slug
    }

    pub fn group_id(&self) -> &ExternalId {
        &self.record.group
    }

    pub fn meta(&self) -> &[MetaRecord] {
        &self.record.meta
    }
}
