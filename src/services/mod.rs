pub mod categories;
pub mod items;
pub mod orders;
pub mod suppliers;

use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{item, ItemIdList};
use crate::errors::ServiceError;

/// Resolves an ordered id list into item records.
///
/// One batch lookup keyed by stored identifiers; input order is preserved
/// and ids with no matching row are dropped silently (weak references).
pub(crate) async fn resolve_items(
    db: &DatabaseConnection,
    ids: &ItemIdList,
) -> Result<Vec<item::Model>, ServiceError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found: HashMap<Uuid, item::Model> = item::Entity::find()
        .filter(item::Column::Id.is_in(ids.0.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|model| (model.id, model))
        .collect();

    Ok(ids.0.iter().filter_map(|id| found.get(id).cloned()).collect())
}
