use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ItemIdList;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Embedded list of item ids. Maintained independently of
    /// `item::Model::supplier_id`; the two views are never reconciled.
    #[sea_orm(column_type = "Json")]
    pub items: ItemIdList,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Canonical detail-page location.
    pub fn url(&self) -> String {
        format!("/supplier/{}", self.id)
    }

    /// Display form of the address: split on `", "`, shorten the second
    /// segment (usually the city) to its first 3 characters when there are
    /// more than two segments, then rejoin. Segments shorter than 3
    /// characters are left untouched.
    pub fn address_formatted(&self) -> String {
        let mut parts: Vec<String> = self.address.split(", ").map(str::to_owned).collect();
        if parts.len() > 2 {
            if let Some((idx, _)) = parts[1].char_indices().nth(3) {
                parts[1].truncate(idx);
            }
        }
        parts.join(", ")
    }
}
