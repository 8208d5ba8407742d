//! Post service

use chrono::NaiveDateTime;

use super::{Store, meta_or_empty};
use crate::core::{ExternalId, Result, SelectBuilder};
use crate::model::{MetaRecord, PostInput, PostRecord};

const POST_COLUMNS: &str = "ID, post_author, post_date, post_date_gmt, post_content, \
     post_title, post_excerpt, post_status, post_name, post_modified, \
     post_modified_gmt, post_parent, guid, post_type";

type PostRow = (
    i64,
    i64,
    NaiveDateTime,
    NaiveDateTime,
    String,
    String,
    String,
    String,
    String,
    NaiveDateTime,
    NaiveDateTime,
    i64,
    String,
    String,
);

/// Optional equality filters for [`PostService::find`], applied in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub id: Option<ExternalId>,
    pub author: Option<ExternalId>,
    pub status: Option<String>,
    pub slug: Option<String>,
    pub parent: Option<ExternalId>,
}

pub struct PostService {
    store: Store,
}

impl PostService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn select(&self, filter: &PostFilter) -> SelectBuilder {
        let mut select = SelectBuilder::new(format!(
            "SELECT {} FROM {} WHERE 1 = 1",
            POST_COLUMNS,
            self.store.table("posts"),
        ));
        if let Some(id) = filter.id {
            select.and_eq("ID", id.as_i64());
        }
        if let Some(author) = filter.author {
            select.and_eq("post_author", author.as_i64());
        }
        if let Some(status) = &filter.status {
            select.and_eq("post_status", status.clone());
        }
        if let Some(slug) = &filter.slug {
            select.and_eq("post_name", slug.clone());
        }
        if let Some(parent) = filter.parent {
            select.and_eq("post_parent", parent.as_i64());
        }
        select
    }

    /// Posts matching every present filter field; all posts when none are
    /// present.
    pub async fn find(&self, filter: &PostFilter) -> Result<Vec<PostRecord>> {
        let (sql, arguments) = self.select(filter).build()?;
        let rows = sqlx::query_as_with::<_, PostRow, _>(&sql, arguments)
            .fetch_all(self.store.pool())
            .await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            let id = ExternalId::from_internal(row.0);
            let meta = meta_or_empty(&self.store, "postmeta", "meta_id", "post_id", &id).await;
            posts.push(row_to_post(row, meta));
        }
        Ok(posts)
    }

    /// Insert a new post and return the assigned id.
    ///
    /// Callers re-read the row through the normal read path to get a
    /// consistent view; there is no insert-returned row shortcut and no
    /// transaction spanning the two statements.
    pub async fn create(&self, author: &ExternalId, input: &PostInput) -> Result<ExternalId> {
        let sql = format!(
            "INSERT INTO {} (post_author, post_title) VALUES (?, ?)",
            self.store.table("posts"),
        );
        let result = sqlx::query(&sql)
            .bind(author.as_i64())
            .bind(&input.title)
            .execute(self.store.pool())
            .await?;
        Ok(ExternalId::from_internal(result.last_insert_id() as i64))
    }

    /// Meta rows for one post.
    pub async fn find_meta(&self, post: &ExternalId) -> Result<Vec<MetaRecord>> {
        super::fetch_meta(&self.store, "postmeta", "meta_id", "post_id", post).await
    }
}

fn row_to_post(row: PostRow, meta: Vec<MetaRecord>) -> PostRecord {
    let (
        id,
        author,
        date,
        date_gmt,
        content,
        title,
        excerpt,
        status,
        name,
        modified,
        modified_gmt,
        parent,
        guid,
        post_type,
    ) = row;
    PostRecord {
        id: ExternalId::from_internal(id),
        author: ExternalId::from_internal(author),
        date,
        date_gmt,
        content,
        title,
        excerpt,
        status,
        name,
        modified,
        modified_gmt,
        parent: ExternalId::from_internal(parent),
        guid,
        post_type,
        meta,
    }
}
