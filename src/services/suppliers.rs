use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{item, supplier, ItemIdList};
use crate::errors::ServiceError;

use super::resolve_items;

/// Validated supplier fields ready to persist.
#[derive(Debug, Clone)]
pub struct NewSupplier {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<Uuid>,
}

/// Detail view carrying both notions of "this supplier's items":
/// the supplier's own embedded list (populated in order) and the reverse
/// lookup over `item.supplier_id`. The two can diverge and are surfaced
/// separately, never merged.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierDetail {
    pub supplier: supplier::Model,
    pub listed_items: Vec<item::Model>,
    pub supplying_items: Vec<item::Model>,
}

/// Service for managing suppliers.
#[derive(Clone)]
pub struct SupplierService {
    db: Arc<DbPool>,
}

impl SupplierService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// All suppliers in storage order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        Ok(supplier::Entity::find().all(&*self.db).await?)
    }

    /// All suppliers sorted by company name, for selection forms.
    #[instrument(skip(self))]
    pub async fn list_by_company(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        Ok(supplier::Entity::find()
            .order_by_asc(supplier::Column::CompanyName)
            .all(&*self.db)
            .await?)
    }

    /// One supplier with both item views resolved.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Option<SupplierDetail>, ServiceError> {
        let Some(supplier) = supplier::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let listed_items = resolve_items(&self.db, &supplier.items).await?;
        let supplying_items = item::Entity::find()
            .filter(item::Column::SupplierId.eq(id))
            .all(&*self.db)
            .await?;

        Ok(Some(SupplierDetail {
            supplier,
            listed_items,
            supplying_items,
        }))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewSupplier) -> Result<supplier::Model, ServiceError> {
        let model = supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_name: Set(input.company_name),
            contact_person: Set(input.contact_person),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            items: Set(ItemIdList::from(input.items)),
        };

        Ok(model.insert(&*self.db).await?)
    }

    /// Updates an existing supplier. A missing id is an error, never a
    /// silent no-op.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: NewSupplier,
    ) -> Result<supplier::Model, ServiceError> {
        let existing = supplier::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier {id} not found")))?;

        let mut active: supplier::ActiveModel = existing.into();
        active.company_name = Set(input.company_name);
        active.contact_person = Set(input.contact_person);
        active.email = Set(input.email);
        active.phone = Set(input.phone);
        active.address = Set(input.address);
        active.items = Set(ItemIdList::from(input.items));

        Ok(active.update(&*self.db).await?)
    }

    /// Unconditional delete. Items naming this supplier keep their dangling
    /// reference.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        supplier::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }
}
