//! Blogroll link record

use chrono::NaiveDateTime;

use crate::core::ExternalId;

/// One row of `{prefix}links`.
#[derive(Debug, Clone)]
pub struct LinkRecord {
    pub id: ExternalId,
    pub url: String,
    pub name: String,
    pub image: String,
    pub target: String,
    pub description: String,
    pub visible: String,
    pub owner: ExternalId,
    pub rating: i32,
    pub updated: NaiveDateTime,
    pub rel: String,
    pub notes: String,
    pub rss: String,
}
