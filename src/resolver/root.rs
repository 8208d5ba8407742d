//! Root resolver: the query entry point
//!
//! One operation per supported query or mutation name. Every operation is
//! single-shot: decode client identifiers, call the service layer, wrap the
//! records. No state is retained between requests; the database is the only
//! persistent state.

use super::{PostResolver, TermTaxonomyResolver, UserResolver};
use crate::core::{Error, ExternalId, Result};
use crate::model::PostInput;
use crate::service::{
    PostFilter, PostService, Store, TermFilter, TermService, UserFilter, UserService,
};

pub struct RootResolver {
    store: Store,
}

impl RootResolver {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All users, unconditionally.
    pub async fn users(&self) -> Result<Vec<UserResolver>> {
        let service = UserService::new(self.store.clone());
        let users = service.find(&UserFilter::default()).await?;
        Ok(users
            .into_iter()
            .map(|record| UserResolver::new(record, self.store.clone()))
            .collect())
    }

    /// One user by external id.
    pub async fn user(&self, id: &str) -> Result<UserResolver> {
        let id = ExternalId::decode(id)?;
        let service = UserService::new(self.store.clone());
        let filter = UserFilter {
            id: Some(id),
            ..Default::default()
        };
        let record = service
            .find(&filter)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                entity: "user",
                id: id.to_string(),
            })?;
        Ok(UserResolver::new(record, self.store.clone()))
    }

    /// Posts authored by one user.
    pub async fn posts(&self, user_id: &str) -> Result<Vec<PostResolver>> {
        let author = ExternalId::decode(user_id)?;
        let service = PostService::new(self.store.clone());
        let filter = PostFilter {
            author: Some(author),
            ..Default::default()
        };
        let posts = service.find(&filter).await?;
        Ok(posts
            .into_iter()
            .map(|record| PostResolver::new(record, self.store.clone()))
            .collect())
    }

    /// One post by external id.
    pub async fn post(&self, id: &str) -> Result<PostResolver> {
        let id = ExternalId::decode(id)?;
        let service = PostService::new(self.store.clone());
        let filter = PostFilter {
            id: Some(id),
            ..Default::default()
        };
        let record = service
            .find(&filter)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                entity: "post",
                id: id.to_string(),
            })?;
        Ok(PostResolver::new(record, self.store.clone()))
    }

    /// Taxonomy entries, optionally narrowed by taxonomy name and/or term
    /// slug.
    pub async fn terms(
        &self,
        taxonomy: Option<String>,
        slug: Option<String>,
    ) -> Result<Vec<TermTaxonomyResolver>> {
        let service = TermService::new(self.store.clone());
        let filter = TermFilter {
            taxonomy,
            slug,
            ..Default::default()
        };
        let taxonomies = service.find(&filter).await?;
        Ok(taxonomies
            .into_iter()
            .map(TermTaxonomyResolver::new)
            .collect())
    }

    /// Create a post, then re-read it through the normal read path so the
    /// returned resolver reflects the row as stored, not the input as
    /// given. Two independent statements; no transaction spans them.
    pub async fn create_post(&self, user_id: &str, input: PostInput) -> Result<PostResolver> {
        let author = ExternalId::decode(user_id)?;
        let service = PostService::new(self.store.clone());
        let new_id = service.create(&author, &input).await?;
        self.post(&new_id.to_string()).await
    }
}
