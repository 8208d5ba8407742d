//! Taxonomy service
//!
//! Terms are always read through the `term_taxonomy × terms` join, the way
//! the taxonomy tables are meant to be consumed: every result row is a
//! taxonomy entry carrying its owning term.

use super::{Store, meta_or_empty};
use crate::core::{ExternalId, Result, SelectBuilder};
use crate::model::{MetaRecord, TermRecord, TermRelationshipRecord, TermTaxonomyRecord};

const TERM_COLUMNS: &str = "tt.term_taxonomy_id, tt.term_id, tt.taxonomy, tt.description, \
     tt.parent, tt.count, t.name, t.slug, t.term_group";

type TermTaxonomyRow = (i64, i64, String, String, i64, u64, String, String, i64);

type RelationshipRow = (i64, i64, i64);

/// Optional equality filters for [`TermService::find`], applied in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct TermFilter {
    pub term_id: Option<ExternalId>,
    pub taxonomy: Option<String>,
    pub slug: Option<String>,
    pub parent: Option<ExternalId>,
}

pub struct TermService {
    store: Store,
}

impl TermService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn join_base(&self) -> String {
        format!(
            "SELECT {} FROM {} tt INNER JOIN {} t ON tt.term_id = t.term_id WHERE 1 = 1",
            TERM_COLUMNS,
            self.store.table("term_taxonomy"),
            self.store.table("terms"),
        )
    }

    fn select(&self, filter: &TermFilter) -> SelectBuilder {
        let mut select = SelectBuilder::new(self.join_base());
        if let Some(term_id) = filter.term_id {
            select.and_eq("tt.term_id", term_id.as_i64());
        }
        if let Some(taxonomy) = &filter.taxonomy {
            select.and_eq("tt.taxonomy", taxonomy.clone());
        }
        if let Some(slug) = &filter.slug {
            select.and_eq("t.slug", slug.clone());
        }
        if let Some(parent) = filter.parent {
            select.and_eq("tt.parent", parent.as_i64());
        }
        select
    }

    /// Taxonomy entries matching every present filter field.
    pub async fn find(&self, filter: &TermFilter) -> Result<Vec<TermTaxonomyRecord>> {
        self.fetch_taxonomies(self.select(filter)).await
    }

    /// Taxonomy entries attached to one post-like object through
    /// `term_relationships`.
    pub async fn find_for_object(&self, object: &ExternalId) -> Result<Vec<TermTaxonomyRecord>> {
        let base = format!(
            "SELECT {} FROM {} tr \
             INNER JOIN {} tt ON tr.term_taxonomy_id = tt.term_taxonomy_id \
             INNER JOIN {} t ON tt.term_id = t.term_id \
             WHERE 1 = 1",
            TERM_COLUMNS,
            self.store.table("term_relationships"),
            self.store.table("term_taxonomy"),
            self.store.table("terms"),
        );
        let mut select = SelectBuilder::new(base);
        select.and_eq("tr.object_id", object.as_i64());
        self.fetch_taxonomies(select).await
    }

    /// Raw relationship rows for one object.
    pub async fn find_relationships(
        &self,
        object: &ExternalId,
    ) -> Result<Vec<TermRelationshipRecord>> {
        let sql = format!(
            "SELECT object_id, term_taxonomy_id, term_order FROM {} WHERE object_id = ?",
            self.store.table("term_relationships"),
        );
        let rows = sqlx::query_as::<_, RelationshipRow>(&sql)
            .bind(object.as_i64())
            .fetch_all(self.store.pool())
            .await?;
        Ok(rows
            .into_iter()
            .map(|(object_id, term_taxonomy_id, order)| TermRelationshipRecord {
                object_id: ExternalId::from_internal(object_id),
                term_taxonomy_id: ExternalId::from_internal(term_taxonomy_id),
                order,
            })
            .collect())
    }

    /// Whether any taxonomy entry uses the given taxonomy name.
    pub async fn taxonomy_exists(&self, taxonomy: &str) -> Result<bool> {
        let sql = format!(
            "SELECT COUNT(taxonomy) FROM {} WHERE taxonomy = ?",
            self.store.table("term_taxonomy"),
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(taxonomy)
            .fetch_one(self.store.pool())
            .await?;
        Ok(count > 0)
    }

    /// Meta rows for one term.
    pub async fn find_meta(&self, term: &ExternalId) -> Result<Vec<MetaRecord>> {
        super::fetch_meta(&self.store, "termmeta", "meta_id", "term_id", term).await
    }

    async fn fetch_taxonomies(&self, select: SelectBuilder) -> Result<Vec<TermTaxonomyRecord>> {
        let (sql, arguments) = select.build()?;
        let rows = sqlx::query_as_with::<_, TermTaxonomyRow, _>(&sql, arguments)
            .fetch_all(self.store.pool())
            .await?;

        let mut taxonomies = Vec::with_capacity(rows.len());
        for row in rows {
            let term_id = ExternalId::from_internal(row.1);
            let meta = meta_or_empty(&self.store, "termmeta", "meta_id", "term_id", &term_id).await;
            taxonomies.push(row_to_taxonomy(row, meta));
        }
        Ok(taxonomies)
    }
}

fn row_to_taxonomy(row: TermTaxonomyRow, meta: Vec<MetaRecord>) -> TermTaxonomyRecord {
    let (id, term_id, taxonomy, description, parent, count, name, slug, group) = row;
    let term_id = ExternalId::from_internal(term_id);
    TermTaxonomyRecord {
        id: ExternalId::from_internal(id),
        term_id,
        taxonomy,
        description,
        parent: ExternalId::from_internal(parent),
        count,
        term: TermRecord {
            id: term_id,
            name,
            slug,
            group: ExternalId::from_internal(group),
            meta,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Bind;

    fn test_service() -> TermService {
        let pool = sqlx::MySqlPool::connect_lazy("mysql://root@localhost/wp").unwrap();
        TermService::new(Store::new(pool, "wpa_"))
    }

    #[tokio::test]
    async fn base_statement_joins_taxonomy_to_terms() {
        let service = test_service();
        let select = service.select(&TermFilter::default());
        assert!(
            select
                .sql()
                .contains("wpa_term_taxonomy tt INNER JOIN wpa_terms t")
        );
        assert!(select.binds().is_empty());
    }

    #[tokio::test]
    async fn filters_address_the_joined_aliases() {
        let service = test_service();
        let filter = TermFilter {
            term_id: None,
            taxonomy: Some("category".to_string()),
            slug: Some("news".to_string()),
            parent: None,
        };
        let select = service.select(&filter);
        assert!(select.sql().ends_with("AND tt.taxonomy = ? AND t.slug = ?"));
        assert_eq!(
            select.binds(),
            &[
                Bind::Text("category".to_string()),
                Bind::Text("news".to_string())
            ]
        );
    }

    #[test]
    fn taxonomy_row_carries_its_term() {
        let row: TermTaxonomyRow = (
            5,
            2,
            "category".to_string(),
            "".to_string(),
            0,
            3,
            "News".to_string(),
            "news".to_string(),
            0,
        );
        let taxonomy = row_to_taxonomy(row, Vec::new());
        assert_eq!(taxonomy.id.to_string(), "5");
        assert_eq!(taxonomy.term_id, taxonomy.term.id);
        assert_eq!(taxonomy.parent.to_string(), "0");
        assert_eq!(taxonomy.count, 3);
        assert_eq!(taxonomy.term.slug, "news");
    }
}
