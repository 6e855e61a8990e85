//! Stockroom
//!
//! Server-rendered inventory management: staff manage items, categories,
//! suppliers, and orders through browser forms backed by a relational store.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod sanitize;
pub mod services;
pub mod views;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

/// Full route table: dashboard plus the four entity routers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::dashboard_routes())
        .merge(handlers::categories::category_routes())
        .merge(handlers::items::item_routes())
        .merge(handlers::suppliers::supplier_routes())
        .merge(handlers::orders::order_routes())
}
