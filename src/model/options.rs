//! Site option record

use crate::core::ExternalId;

/// One row of `{prefix}options`.
#[derive(Debug, Clone)]
pub struct OptionRecord {
    pub id: ExternalId,
    pub name: String,
    pub value: String,
    pub autoload: String,
}
