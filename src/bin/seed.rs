//! One-shot sample-data loader.
//!
//! Clears every collection, then inserts a fixed set of suppliers,
//! categories, items, and orders. Orders go through the checked create
//! path: an order referencing an item that did not resolve is a failure,
//! not a silent save.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use tracing::info;
use uuid::Uuid;

use stockroom::db;
use stockroom::entities::{category, item, order, order::OrderStatus, supplier};
use stockroom::handlers::AppServices;
use stockroom::services::categories::NewCategory;
use stockroom::services::items::NewItem;
use stockroom::services::orders::NewOrder;
use stockroom::services::suppliers::NewSupplier;

/// Populate the store with sample data.
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct Args {
    /// Store connection string, e.g. sqlite://stockroom.db?mode=rwc
    connection: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "seed=info,stockroom=info".to_string()),
        )
        .init();

    let args = Args::parse();

    let db = db::establish_connection(&args.connection)
        .await
        .context("connecting to the store")?;
    db::run_migrations(&db).await.context("running migrations")?;

    let db = Arc::new(db);
    clear_data(&db).await?;

    let services = AppServices::new(db);

    let suppliers = create_suppliers(&services).await?;
    let categories = create_categories(&services).await?;
    let items = create_items(&services, &categories, &suppliers).await?;
    create_orders(&services, &items).await?;

    info!("sample data loaded");
    Ok(())
}

/// Deletes all documents from each collection.
async fn clear_data(db: &sea_orm::DatabaseConnection) -> anyhow::Result<()> {
    info!("clearing existing data");
    supplier::Entity::delete_many().exec(db).await?;
    category::Entity::delete_many().exec(db).await?;
    item::Entity::delete_many().exec(db).await?;
    order::Entity::delete_many().exec(db).await?;
    Ok(())
}

async fn create_suppliers(services: &AppServices) -> anyhow::Result<Vec<supplier::Model>> {
    let supplier_data = [
        (
            "ElectroTech",
            "John Doe",
            "info@electrotech.com",
            "123-456-7890",
            "123 Main St, City, Country",
        ),
        (
            "FashionHub",
            "Jane Smith",
            "info@fashionhub.com",
            "987-654-3210",
            "456 Oak St, Town, Country",
        ),
        (
            "HomeGoods Inc.",
            "Bob Johnson",
            "info@homegoods.com",
            "555-123-4567",
            "789 Pine St, Village, Country",
        ),
    ];

    let mut created = Vec::new();
    for (company_name, contact_person, email, phone, address) in supplier_data {
        let supplier = services
            .suppliers
            .create(NewSupplier {
                company_name: company_name.to_string(),
                contact_person: contact_person.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                address: address.to_string(),
                items: Vec::new(),
            })
            .await?;
        info!("added supplier: {}", supplier.company_name);
        created.push(supplier);
    }
    Ok(created)
}

async fn create_categories(services: &AppServices) -> anyhow::Result<Vec<category::Model>> {
    let category_data = [
        ("Electronics", "Electronic devices and accessories"),
        ("Clothing", "Fashionable apparel"),
        ("Home Appliances", "Appliances for the home"),
        ("Books", "Literary works"),
        ("Toys", "Playful items for all ages"),
    ];

    let mut created = Vec::new();
    for (name, description) in category_data {
        let category = services
            .categories
            .create(NewCategory {
                name: name.to_string(),
                description: description.to_string(),
            })
            .await?;
        info!("added category: {}", category.name);
        created.push(category);
    }
    Ok(created)
}

fn find_category(categories: &[category::Model], name: &str) -> anyhow::Result<Uuid> {
    categories
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .with_context(|| format!("category '{name}' missing from seed set"))
}

fn find_supplier(suppliers: &[supplier::Model], company_name: &str) -> anyhow::Result<Uuid> {
    suppliers
        .iter()
        .find(|s| s.company_name == company_name)
        .map(|s| s.id)
        .with_context(|| format!("supplier '{company_name}' missing from seed set"))
}

async fn create_items(
    services: &AppServices,
    categories: &[category::Model],
    suppliers: &[supplier::Model],
) -> anyhow::Result<Vec<item::Model>> {
    let items_data = [
        (
            "Laptop Pro X",
            "High-performance laptop with advanced features",
            "Electronics",
            1200,
            "ElectroTech",
        ),
        (
            "Smartphone Galaxy S22",
            "Latest smartphone model with cutting-edge technology",
            "Electronics",
            800,
            "ElectroTech",
        ),
        (
            "Designer T-shirt",
            "Premium quality cotton T-shirt from a renowned designer",
            "Clothing",
            50,
            "FashionHub",
        ),
        (
            "Bestseller Novel",
            "Acclaimed novel by a bestselling author",
            "Books",
            30,
            "HomeGoods Inc.",
        ),
        (
            "Educational Toy Set",
            "Fun and educational toy set for children",
            "Toys",
            35,
            "HomeGoods Inc.",
        ),
    ];

    let mut created = Vec::new();
    for (name, description, category_name, price, supplier_name) in items_data {
        let item = services
            .items
            .create(NewItem {
                name: name.to_string(),
                description: description.to_string(),
                category_id: find_category(categories, category_name)?,
                price: Decimal::from(price),
                supplier_id: Some(find_supplier(suppliers, supplier_name)?),
            })
            .await?;
        info!("added item: {}", item.name);
        created.push(item);
    }
    Ok(created)
}

fn find_item(items: &[item::Model], name: &str) -> anyhow::Result<Uuid> {
    items
        .iter()
        .find(|i| i.name == name)
        .map(|i| i.id)
        .with_context(|| format!("item '{name}' missing from seed set"))
}

async fn create_orders(services: &AppServices, items: &[item::Model]) -> anyhow::Result<()> {
    let orders_data = [
        (vec!["Laptop Pro X", "Designer T-shirt"], OrderStatus::Shipped),
        (
            vec!["Smartphone Galaxy S22", "Bestseller Novel"],
            OrderStatus::Pending,
        ),
        (vec!["Educational Toy Set"], OrderStatus::Delivered),
        (vec!["Bestseller Novel"], OrderStatus::Pending),
        (
            vec!["Laptop Pro X", "Smartphone Galaxy S22"],
            OrderStatus::Shipped,
        ),
    ];

    let today = Utc::now().date_naive();

    for (item_names, status) in orders_data {
        let item_ids = item_names
            .iter()
            .map(|name| find_item(items, name))
            .collect::<anyhow::Result<Vec<Uuid>>>()?;

        let order = services
            .orders
            .create_checked(NewOrder {
                items: item_ids,
                order_date: Some(today),
                status,
            })
            .await?;
        info!("added order with status: {}", order.status);
    }
    Ok(())
}
