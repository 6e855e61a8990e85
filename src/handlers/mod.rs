pub mod categories;
pub mod common;
pub mod items;
pub mod orders;
pub mod suppliers;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::db::DbPool;
use crate::services::{
    categories::CategoryService, items::ItemService, orders::OrderService,
    suppliers::SupplierService,
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates the data access used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub categories: Arc<CategoryService>,
    pub items: Arc<ItemService>,
    pub suppliers: Arc<SupplierService>,
    pub orders: Arc<OrderService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            categories: Arc::new(CategoryService::new(db.clone())),
            items: Arc::new(ItemService::new(db.clone())),
            suppliers: Arc::new(SupplierService::new(db.clone())),
            orders: Arc::new(OrderService::new(db)),
        }
    }
}

/// The landing page: stock count plus the latest orders.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(items::index))
}
