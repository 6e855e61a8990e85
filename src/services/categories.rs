use std::sync::Arc;

use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::category;
use crate::errors::ServiceError;

/// Validated category fields ready to persist.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

/// Service for managing categories.
#[derive(Clone)]
pub struct CategoryService {
    db: Arc<DbPool>,
}

impl CategoryService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// All categories in storage order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(category::Entity::find().all(&*self.db).await?)
    }

    /// All categories sorted by name, for selection forms.
    #[instrument(skip(self))]
    pub async fn list_by_name(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
        Ok(category::Entity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewCategory) -> Result<category::Model, ServiceError> {
        let model = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
        };

        Ok(model.insert(&*self.db).await?)
    }

    /// Updates an existing category. A missing id is an error, never a
    /// silent no-op.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: NewCategory,
    ) -> Result<category::Model, ServiceError> {
        let existing = category::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {id} not found")))?;

        let mut active: category::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.description = Set(input.description);

        Ok(active.update(&*self.db).await?)
    }

    /// Unconditional delete; succeeds whether or not the id existed.
    /// Items referencing the category keep their dangling reference.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        category::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }
}
