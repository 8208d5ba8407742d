//! Blogroll link service

use chrono::NaiveDateTime;

use super::Store;
use crate::core::{ExternalId, Result, SelectBuilder};
use crate::model::LinkRecord;

const LINK_COLUMNS: &str = "link_id, link_url, link_name, link_image, link_target, \
     link_description, link_visible, link_owner, link_rating, link_updated, \
     link_rel, link_notes, link_rss";

type LinkRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    String,
    i64,
    i32,
    NaiveDateTime,
    String,
    String,
    String,
);

/// Optional equality filters for [`LinkService::find`], applied in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    pub id: Option<ExternalId>,
    pub visible: Option<String>,
    pub owner: Option<ExternalId>,
}

pub struct LinkService {
    store: Store,
}

impl LinkService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn select(&self, filter: &LinkFilter) -> SelectBuilder {
        let mut select = SelectBuilder::new(format!(
            "SELECT {} FROM {} WHERE 1 = 1",
            LINK_COLUMNS,
            self.store.table("links"),
        ));
        if let Some(id) = filter.id {
            select.and_eq("link_id", id.as_i64());
        }
        if let Some(visible) = &filter.visible {
            select.and_eq("link_visible", visible.clone());
        }
        if let Some(owner) = filter.owner {
            select.and_eq("link_owner", owner.as_i64());
        }
        select
    }

    /// Links matching every present filter field.
    pub async fn find(&self, filter: &LinkFilter) -> Result<Vec<LinkRecord>> {
        let (sql, arguments) = self.select(filter).build()?;
        let rows = sqlx::query_as_with::<_, LinkRow, _>(&sql, arguments)
            .fetch_all(self.store.pool())
            .await?;
        Ok(rows.into_iter().map(row_to_link).collect())
    }
}

fn row_to_link(row: LinkRow) -> LinkRecord {
    let (
        id,
        url,
        name,
        image,
        target,
        description,
        visible,
        owner,
        rating,
        updated,
        rel,
        notes,
        rss,
    ) = row;
    LinkRecord {
        id: ExternalId::from_internal(id),
        url,
        name,
        image,
        target,
        description,
        visible,
        owner: ExternalId::from_internal(owner),
        rating,
        updated,
        rel,
        notes,
        rss,
    }
}
