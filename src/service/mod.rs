//! Entity services: SQL construction and row decoding, one per table family
//!
//! Every service is built from a [`Store`] (the shared connection pool plus
//! the install's table-name prefix) and follows the same operation shape:
//!
//! - `find(&Filter)`: base projection plus one `AND column = ?` predicate
//!   per present filter field, in declaration order; zero present fields is
//!   a full-table scan
//! - `find_meta(&ExternalId)`: equality lookup against the family's meta
//!   table; the row-decode loops treat a failure here as "no metadata"
//!   rather than failing the parent lookup
//!
//! Internal integer keys are converted through [`ExternalId`] while rows
//! are decoded; records leave the service layer carrying external
//! identifiers only.

pub mod comments;
pub mod links;
pub mod options;
pub mod post;
pub mod terms;
pub mod user;

pub use comments::{CommentFilter, CommentService};
pub use links::{LinkFilter, LinkService};
pub use options::{OptionFilter, OptionService};
pub use post::{PostFilter, PostService};
pub use terms::{TermFilter, TermService};
pub use user::{UserFilter, UserService};

use sqlx::MySqlPool;

use crate::core::{ExternalId, Result};
use crate::model::MetaRecord;

/// Shared database handle: connection pool plus table-name prefix.
///
/// Cloning is cheap (the pool is reference-counted); one `Store` is shared
/// by every service and resolver created during a query execution, and
/// none of them mutate it.
#[derive(Clone, Debug)]
pub struct Store {
    pool: MySqlPool,
    prefix: String,
}

impl Store {
    pub fn new(pool: MySqlPool, prefix: impl Into<String>) -> Self {
        Self {
            pool,
            prefix: prefix.into(),
        }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Physical table name for this install, e.g. `table("users")` →
    /// `wpa_users`.
    pub fn table(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

type MetaRow = (i64, i64, String, String);

/// Fetch the meta rows for one owner from the given meta table.
pub(crate) async fn fetch_meta(
    store: &Store,
    table: &str,
    meta_id_column: &str,
    owner_column: &str,
    owner: &ExternalId,
) -> Result<Vec<MetaRecord>> {
    let sql = format!(
        "SELECT {}, {}, meta_key, meta_value FROM {} WHERE {} = ?",
        meta_id_column,
        owner_column,
        store.table(table),
        owner_column,
    );

    let rows = sqlx::query_as::<_, MetaRow>(&sql)
        .bind(owner.as_i64())
        .fetch_all(store.pool())
        .await?;

    Ok(rows
        .into_iter()
        .map(|(meta_id, owner_id, key, value)| MetaRecord {
            meta_id: ExternalId::from_internal(meta_id),
            owner_id: ExternalId::from_internal(owner_id),
            key,
            value,
        })
        .collect())
}

/// Best-effort meta fetch: a failure degrades the parent record to "no
/// metadata" instead of failing the whole lookup. The error is logged and
/// swallowed.
pub(crate) async fn meta_or_empty(
    store: &Store,
    table: &str,
    meta_id_column: &str,
    owner_column: &str,
    owner: &ExternalId,
) -> Vec<MetaRecord> {
    match fetch_meta(store, table, meta_id_column, owner_column, owner).await {
        Ok(meta) => meta,
        Err(err) => {
            tracing::warn!(
                table,
                owner = %owner,
                error = %err,
                "metadata lookup failed, continuing without it"
            );
            Vec::new()
        }
    }
}
