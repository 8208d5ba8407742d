//! Comment service

use chrono::NaiveDateTime;

use super::{Store, meta_or_empty};
use crate::core::{ExternalId, Result, SelectBuilder};
use crate::model::{CommentRecord, MetaRecord};

const COMMENT_COLUMNS: &str = "comment_ID, comment_post_ID, comment_author, \
     comment_author_email, comment_author_url, comment_author_IP, comment_date, \
     comment_date_gmt, comment_content, comment_karma, comment_approved, \
     comment_agent, comment_type, comment_parent, user_id";

type CommentRow = (
    i64,
    i64,
    String,
    String,
    String,
    String,
    NaiveDateTime,
    NaiveDateTime,
    String,
    i64,
    String,
    String,
    String,
    i64,
    i64,
);

/// Optional equality filters for [`CommentService::find`], applied in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub id: Option<ExternalId>,
    pub post: Option<ExternalId>,
    pub approved: Option<String>,
    pub parent: Option<ExternalId>,
    pub user: Option<ExternalId>,
}

pub struct CommentService {
    store: Store,
}

impl CommentService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn select(&self, filter: &CommentFilter) -> SelectBuilder {
        let mut select = SelectBuilder::new(format!(
            "SELECT {} FROM {} WHERE 1 = 1",
            COMMENT_COLUMNS,
            self.store.table("comments"),
        ));
        if let Some(id) = filter.id {
            select.and_eq("comment_ID", id.as_i64());
        }
        if let Some(post) = filter.post {
            select.and_eq("comment_post_ID", post.as_i64());
        }
        if let Some(approved) = &filter.approved {
            select.and_eq("comment_approved", approved.clone());
        }
        if let Some(parent) = filter.parent {
            select.and_eq("comment_parent", parent.as_i64());
        }
        if let Some(user) = filter.user {
            select.and_eq("user_id", user.as_i64());
        }
        select
    }

    /// Comments matching every present filter field.
    pub async fn find(&self, filter: &CommentFilter) -> Result<Vec<CommentRecord>> {
        let (sql, arguments) = self.select(filter).build()?;
        let rows = sqlx::query_as_with::<_, CommentRow, _>(&sql, arguments)
            .fetch_all(self.store.pool())
            .await?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in rows {
            let id = ExternalId::from_internal(row.0);
            let meta =
                meta_or_empty(&self.store, "commentmeta", "meta_id", "comment_id", &id).await;
            comments.push(row_to_comment(row, meta));
        }
        Ok(comments)
    }

    /// Meta rows for one comment.
    pub async fn find_meta(&self, comment: &ExternalId) -> Result<Vec<MetaRecord>> {
        super::fetch_meta(&self.store, "commentmeta", "meta_id", "comment_id", comment).await
    }
}

fn row_to_comment(row: CommentRow, meta: Vec<MetaRecord>) -> CommentRecord {
    let (
        id,
        post_id,
        author,
        author_email,
        author_url,
        author_ip,
        date,
        date_gmt,
        content,
        karma,
        approved,
        agent,
        comment_type,
        parent,
        user_id,
    ) = row;
    CommentRecord {
        id: ExternalId::from_internal(id),
        post_id: ExternalId::from_internal(post_id),
        author,
        author_email,
        author_url,
        author_ip,
        date,
        date_gmt,
        content,
        karma,
        approved,
        agent,
        comment_type,
        parent: ExternalId::from_internal(parent),
        user_id: ExternalId::from_internal(user_id),
        meta,
    }
}
