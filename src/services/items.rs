use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{category, item, supplier};
use crate::errors::ServiceError;

/// Validated item fields ready to persist. Referenced ids are stored as
/// given; their existence is not verified.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    pub price: Decimal,
    pub supplier_id: Option<Uuid>,
}

/// List row: the item plus name-only projections of its references.
/// Dangling references project to `None`.
#[derive(Debug, Clone, Serialize)]
pub struct ItemRow {
    pub item: item::Model,
    pub category_name: Option<String>,
    pub supplier_name: Option<String>,
}

/// Detail view: the item with both references fully resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetail {
    pub item: item::Model,
    pub category: Option<category::Model>,
    pub supplier: Option<supplier::Model>,
}

/// Service for managing items.
#[derive(Clone)]
pub struct ItemService {
    db: Arc<DbPool>,
}

impl ItemService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// All items sorted by name, with category and supplier names resolved.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ItemRow>, ServiceError> {
        let items = item::Entity::find()
            .order_by_asc(item::Column::Name)
            .all(&*self.db)
            .await?;

        let category_ids: Vec<Uuid> = items.iter().map(|i| i.category_id).collect();
        let supplier_ids: Vec<Uuid> = items.iter().filter_map(|i| i.supplier_id).collect();

        let category_names: HashMap<Uuid, String> = category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let supplier_names: HashMap<Uuid, String> = supplier::Entity::find()
            .filter(supplier::Column::Id.is_in(supplier_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.company_name))
            .collect();

        Ok(items
            .into_iter()
            .map(|item| ItemRow {
                category_name: category_names.get(&item.category_id).cloned(),
                supplier_name: item
                    .supplier_id
                    .and_then(|id| supplier_names.get(&id).cloned()),
                item,
            })
            .collect())
    }

    /// One item with both references resolved. Dangling references resolve
    /// to `None` without error.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Option<ItemDetail>, ServiceError> {
        let Some(item) = item::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let category = category::Entity::find_by_id(item.category_id)
            .one(&*self.db)
            .await?;
        let supplier = match item.supplier_id {
            Some(supplier_id) => {
                supplier::Entity::find_by_id(supplier_id)
                    .one(&*self.db)
                    .await?
            }
            None => None,
        };

        Ok(Some(ItemDetail {
            item,
            category,
            supplier,
        }))
    }

    /// Number of items in stock, for the dashboard.
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(item::Entity::find().count(&*self.db).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewItem) -> Result<item::Model, ServiceError> {
        let model = item::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            category_id: Set(input.category_id),
            price: Set(input.price),
            supplier_id: Set(input.supplier_id),
        };

        Ok(model.insert(&*self.db).await?)
    }

    /// Updates an existing item. A missing id is an error, never a silent
    /// no-op.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: NewItem) -> Result<item::Model, ServiceError> {
        let existing = item::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {id} not found")))?;

        let mut active: item::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.description = Set(input.description);
        active.category_id = Set(input.category_id);
        active.price = Set(input.price);
        active.supplier_id = Set(input.supplier_id);

        Ok(active.update(&*self.db).await?)
    }

    /// Unconditional delete. Orders and supplier item lists referencing the
    /// item keep their dangling references.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        item::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }
}
