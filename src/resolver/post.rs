//! Post resolver

use super::{TermTaxonomyResolver, UserResolver, format_datetime};
use crate::core::{Error, ExternalId, Result};
use crate::model::{MetaRecord, PostRecord};
use crate::service::{Store, TermService, UserFilter, UserService};

#[derive(Debug)]
pub struct PostResolver {
    record: PostRecord,
    store: Store,
}

impl PostResolver {
    pub fn new(record: PostRecord, store: Store) -> Self {
        Self { record, store }
    }

    pub fn post_id(&self) -> &ExternalId {
        &self.record.id
    }

    pub fn author_id(&self) -> &ExternalId {
        &self.record.author
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }

    pub fn content(&self) -> &str {
        &self.record.content
    }

    pub fn excerpt(&self) -> &str {
        &self.record.excerpt
    }

    pub fn status(&self) -> &str {
        &self.record.status
    }

    pub fn slug(&self) -> &str {
        &self.record.name
    }

    pub fn date(&self) -> String {
        format_datetime(&self.record.date)
    }

    pub fn modified(&self) -> String {
        format_datetime(&self.record.modified)
    }

    pub fn parent_id(&self) -> &ExternalId {
        &self.record.parent
    }

    pub fn post_type(&self) -> &str {
        &self.record.post_type
    }

    pub fn meta(&self) -> &[MetaRecord] {
        &self.record.meta
    }

    /// The authoring user; one fresh lookup per invocation.
    pub async fn author(&self) -> Result<UserResolver> {
        let service = UserService::new(self.store.clone());
        let filter = UserFilter {
            id: Some(self.record.author),
            ..Default::default()
        };
        let record = service
            .find(&filter)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                entity: "user",
                id: self.record.author.to_string(),
            })?;
        Ok(UserResolver::new(record, self.store.clone()))
    }

    /// Taxonomy entries attached to this post; one fresh query per
    /// invocation.
    pub async fn terms(&self) -> Result<Vec<TermTaxonomyResolver>> {
        let service = TermService::new(self.store.clone());
        let taxonomies = service.find_for_object(&self.record.id).await?;
        Ok(taxonomies
            .into_iter()
            .map(TermTaxonomyResolver::new)
            .collect())
    }
}
