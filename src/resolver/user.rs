//! User resolver

use super::{PostResolver, format_datetime};
use crate::core::{ExternalId, Result};
use crate::model::{MetaRecord, UserRecord};
use crate::service::{PostFilter, PostService, Store};

#[derive(Debug)]
pub struct UserResolver {
    record: UserRecord,
    store: Store,
}

impl UserResolver {
    pub fn new(record: UserRecord, store: Store) -> Self {
        Self { record, store }
    }

    pub fn user_id(&self) -> &ExternalId {
        &self.record.id
    }

    pub fn username(&self) -> &str {
        &self.record.login
    }

    pub fn nice_name(&self) -> &str {
        &self.record.nice_name
    }

    pub fn email(&self) -> &str {
        &self.record.email
    }

    pub fn url(&self) -> &str {
        &self.record.url
    }

    pub fn registered(&self) -> String {
        format_datetime(&self.record.registered)
    }

    pub fn status(&self) -> i32 {
        self.record.status
    }

    /// Display name, falling back to the login when the display-name
    /// column holds an empty string.
    pub fn display_name(&self) -> &str {
        if !self.record.display_name.is_empty() {
            &self.record.display_name
        } else {
            &self.record.login
        }
    }

    pub fn meta(&self) -> &[MetaRecord] {
        &self.record.meta
    }

    /// Posts authored by this user; one fresh query per invocation.
    pub async fn posts(&self) -> Result<Vec<PostResolver>> {
        let service = PostService::new(self.store.clone());
        let filter = PostFilter {
            author: Some(self.record.id),
            ..Default::default()
        };
        let posts = service.find(&filter).await?;
        Ok(posts
            .into_iter()
            .map(|record| PostResolver::new(record, self.store.clone()))
            .collect())
    }
}
