//! Site option service

use super::Store;
use crate::core::{ExternalId, Result, SelectBuilder};
use crate::model::OptionRecord;

const OPTION_COLUMNS: &str = "option_id, option_name, option_value, autoload";

type OptionRow = (i64, String, String, String);

/// Optional equality filters for [`OptionService::find`], applied in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct OptionFilter {
    pub id: Option<ExternalId>,
    pub name: Option<String>,
    pub autoload: Option<String>,
}

pub struct OptionService {
    store: Store,
}

impl OptionService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn select(&self, filter: &OptionFilter) -> SelectBuilder {
        let mut select = SelectBuilder::new(format!(
            "SELECT {} FROM {} WHERE 1 = 1",
            OPTION_COLUMNS,
            self.store.table("options"),
        ));
        if let Some(id) = filter.id {
            select.and_eq("option_id", id.as_i64());
        }
        if let Some(name) = &filter.name {
            select.and_eq("option_name", name.clone());
        }
        if let Some(autoload) = &filter.autoload {
            select.and_eq("autoload", autoload.clone());
        }
        select
    }

    /// Options matching every present filter field.
    pub async fn find(&self, filter: &OptionFilter) -> Result<Vec<OptionRecord>> {
        let (sql, arguments) = self.select(filter).build()?;
        let rows = sqlx::query_as_with::<_, OptionRow, _>(&sql, arguments)
            .fetch_all(self.store.pool())
            .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, value, autoload)| OptionRecord {
                id: ExternalId::from_internal(id),
                name,
                value,
                autoload,
            })
            .collect())
    }
}
