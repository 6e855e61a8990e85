use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ItemIdList;

/// Flat order status. Any value may be set to any other via update; there
/// is no transition graph.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Parses a form value, rejecting anything outside the enum.
    pub fn parse(value: &str) -> Option<Self> {
        Self::from_str(value).ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Ordered weak references; existence is not re-verified before saving.
    #[sea_orm(column_type = "Json")]
    pub items: ItemIdList,
    pub order_date: Option<NaiveDate>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Canonical detail-page location.
    pub fn url(&self) -> String {
        format!("/order/{}", self.id)
    }

    /// Medium date style for display, e.g. `Oct 3, 2023`. Empty when the
    /// order has no date.
    pub fn order_date_format(&self) -> String {
        self.order_date
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

/// Sum of prices over the resolved items of an order. Zero when the list is
/// empty or nothing resolved.
pub fn total_price(items: &[super::item::Model]) -> Decimal {
    items.iter().map(|item| item.price).sum()
}
