//! User record

use chrono::NaiveDateTime;

use super::MetaRecord;
use crate::core::ExternalId;

/// One row of `{prefix}users`, plus its eager-fetched meta rows.
///
/// The password hash and activation key are scanned with the rest of the
/// projection but are never exposed through the resolver graph.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: ExternalId,
    pub login: String,
    pub pass: String,
    pub nice_name: String,
    pub email: String,
    pub url: String,
    pub registered: NaiveDateTime,
    pub activation_key: String,
    pub status: i32,
    pub display_name: String,
    pub meta: Vec<MetaRecord>,
}
