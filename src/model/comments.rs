//! Comment record

use chrono::NaiveDateTime;

use super::MetaRecord;
use crate::core::ExternalId;

/// One row of `{prefix}comments`, plus its eager-fetched meta rows.
#[derive(Debug, Clone)]
pub struct CommentRecord {
    pub id: ExternalId,
    pub post_id: ExternalId,
    pub author: String,
    pub author_email: String,
    pub author_url: String,
    pub author_ip: String,
    pub date: NaiveDateTime,
    pub date_gmt: NaiveDateTime,
    pub content: String,
    pub karma: i64,
    pub approved: String,
    pub agent: String,
    pub comment_type: String,
    pub parent: ExternalId,
    pub user_id: ExternalId,
    pub meta: Vec<MetaRecord>,
}
