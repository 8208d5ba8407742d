//! Post record and mutation input

use chrono::NaiveDateTime;

use super::MetaRecord;
use crate::core::ExternalId;

/// One row of `{prefix}posts`, plus its eager-fetched meta rows.
///
/// `parent` is the encoded id `"0"` when the post has no parent, matching
/// the storage convention.
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub id: ExternalId,
    pub author: ExternalId,
    pub date: NaiveDateTime,
    pub date_gmt: NaiveDateTime,
    pub content: String,
    pub title: String,
    pub excerpt: String,
    pub status: String,
    pub name: String,
    pub modified: NaiveDateTime,
    pub modified_gmt: NaiveDateTime,
    pub parent: ExternalId,
    pub guid: String,
    pub post_type: String,
    pub meta: Vec<MetaRecord>,
}

/// Client input for the create-post mutation.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
}
