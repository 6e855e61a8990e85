pub mod category;
pub mod item;
pub mod order;
pub mod supplier;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered list of item ids stored as a JSON column.
///
/// This is a weak reference list: ids are not existence-checked at write
/// time and are never updated when the referenced item is deleted. Read-time
/// populate drops ids that no longer resolve.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ItemIdList(pub Vec<Uuid>);

impl ItemIdList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<Uuid>> for ItemIdList {
    fn from(ids: Vec<Uuid>) -> Self {
        Self(ids)
    }
}
