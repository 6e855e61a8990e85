use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::{item, order, order::OrderStatus, ItemIdList};
use crate::errors::ServiceError;

use super::resolve_items;

/// Validated order fields ready to persist. Item ids are stored as given;
/// the live create/update paths do not re-verify their existence.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub items: Vec<Uuid>,
    pub order_date: Option<NaiveDate>,
    pub status: OrderStatus,
}

/// An order with its item references resolved and the derived fields
/// templates display.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub order: order::Model,
    pub items: Vec<item::Model>,
    pub total_price: Decimal,
    pub order_date_format: String,
}

impl OrderView {
    fn new(order: order::Model, items: Vec<item::Model>) -> Self {
        let total_price = order::total_price(&items);
        let order_date_format = order.order_date_format();
        Self {
            order,
            items,
            total_price,
            order_date_format,
        }
    }
}

/// Service for managing orders.
#[derive(Clone)]
pub struct OrderService {
    db: Arc<DbPool>,
}

impl OrderService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// All orders ascending by order date, items resolved, totals computed.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<OrderView>, ServiceError> {
        let orders = order::Entity::find()
            .order_by_asc(order::Column::OrderDate)
            .all(&*self.db)
            .await?;

        self.into_views(orders).await
    }

    /// The most recent `limit` orders by date, for the dashboard.
    #[instrument(skip(self))]
    pub async fn latest(&self, limit: u64) -> Result<Vec<OrderView>, ServiceError> {
        let orders = order::Entity::find()
            .order_by_desc(order::Column::OrderDate)
            .limit(limit)
            .all(&*self.db)
            .await?;

        self.into_views(orders).await
    }

    /// One order with items resolved and total computed.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Option<OrderView>, ServiceError> {
        let Some(order) = order::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let items = resolve_items(&self.db, &order.items).await?;
        Ok(Some(OrderView::new(order, items)))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewOrder) -> Result<order::Model, ServiceError> {
        let model = order::ActiveModel {
            id: Set(Uuid::new_v4()),
            items: Set(ItemIdList::from(input.items)),
            order_date: Set(input.order_date),
            status: Set(input.status.to_string()),
        };

        Ok(model.insert(&*self.db).await?)
    }

    /// Import-path create: every referenced item id must resolve, otherwise
    /// the order is not saved.
    #[instrument(skip(self, input))]
    pub async fn create_checked(&self, input: NewOrder) -> Result<order::Model, ServiceError> {
        let resolved = resolve_items(&self.db, &ItemIdList::from(input.items.clone())).await?;
        if resolved.len() != input.items.len() {
            return Err(ServiceError::InvalidInput(
                "order references items that do not exist".to_string(),
            ));
        }

        self.create(input).await
    }

    /// Updates an existing order. A missing id is an error, never a silent
    /// no-op. Status may move between any two values; there is no guarded
    /// transition graph.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: NewOrder) -> Result<order::Model, ServiceError> {
        let existing = order::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {id} not found")))?;

        let mut active: order::ActiveModel = existing.into();
        active.items = Set(ItemIdList::from(input.items));
        active.order_date = Set(input.order_date);
        active.status = Set(input.status.to_string());

        Ok(active.update(&*self.db).await?)
    }

    /// Unconditional delete.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        order::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }

    /// Resolves item references for a batch of orders with one lookup.
    async fn into_views(&self, orders: Vec<order::Model>) -> Result<Vec<OrderView>, ServiceError> {
        let all_ids: Vec<Uuid> = orders
            .iter()
            .flat_map(|o| o.items.0.iter().copied())
            .collect();

        if all_ids.is_empty() {
            return Ok(orders
                .into_iter()
                .map(|o| OrderView::new(o, Vec::new()))
                .collect());
        }

        let found: HashMap<Uuid, item::Model> = item::Entity::find()
            .filter(item::Column::Id.is_in(all_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|model| (model.id, model))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = order
                    .items
                    .0
                    .iter()
                    .filter_map(|id| found.get(id).cloned())
                    .collect();
                OrderView::new(order, items)
            })
            .collect())
    }
}
