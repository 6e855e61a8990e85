mod common;

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use uuid::Uuid;

use stockroom::entities::item;
use stockroom::services::categories::NewCategory;
use stockroom::services::items::NewItem;
use stockroom::services::suppliers::NewSupplier;

use common::{body_string, redirect_target, TestApp};

async fn seed_category(app: &TestApp, name: &str) -> Uuid {
    app.state
        .services
        .categories
        .create(NewCategory {
            name: name.into(),
            description: format!("{name} things"),
        })
        .await
        .expect("create category")
        .id
}

async fn seed_supplier(app: &TestApp, company_name: &str) -> Uuid {
    app.state
        .services
        .suppliers
        .create(NewSupplier {
            company_name: company_name.into(),
            contact_person: "John Doe".into(),
            email: "info@electrotech.com".into(),
            phone: "123-456-7890".into(),
            address: "123 Main St, City, Country".into(),
            items: Vec::new(),
        })
        .await
        .expect("create supplier")
        .id
}

#[tokio::test]
async fn create_then_fetch_round_trips_the_fields() {
    let app = TestApp::new().await;
    let category_id = seed_category(&app, "Electronics").await;
    let supplier_id = seed_supplier(&app, "ElectroTech").await;

    let response = app
        .post_form(
            "/items/create",
            &[
                ("name", "Laptop Pro X"),
                ("description", "High-performance laptop"),
                ("category", &category_id.to_string()),
                ("price", "1200"),
                ("supplier", &supplier_id.to_string()),
            ],
        )
        .await;

    let location = redirect_target(&response);
    assert!(location.starts_with("/item/"));

    let detail = app.get(&location).await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body = body_string(detail).await;
    assert!(body.contains("Laptop Pro X"));
    assert!(body.contains("Electronics"));
    assert!(body.contains("ElectroTech"));
}

#[tokio::test]
async fn create_with_blank_fields_reports_each_field_without_persisting() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/items/create",
            &[
                ("name", ""),
                ("description", "  "),
                ("category", ""),
                ("price", ""),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Name must be between 1 and 100 characters."));
    assert!(body.contains("Description must not be empty."));
    assert!(body.contains("Category must not be empty."));
    assert!(body.contains("Price must not be empty."));

    let stored = item::Entity::find().all(&*app.state.db).await.expect("query");
    assert!(stored.is_empty());
}

#[tokio::test]
async fn rejected_create_re_supplies_the_selection_lists() {
    let app = TestApp::new().await;
    seed_category(&app, "Electronics").await;
    seed_supplier(&app, "ElectroTech").await;

    let response = app.post_form("/items/create", &[("name", "")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    // The form is re-rendered with both select lists populated.
    assert!(body.contains("Electronics"));
    assert!(body.contains("ElectroTech"));
}

#[tokio::test]
async fn non_numeric_price_is_a_field_error() {
    let app = TestApp::new().await;
    let category_id = seed_category(&app, "Books").await;

    let response = app
        .post_form(
            "/items/create",
            &[
                ("name", "Bestseller Novel"),
                ("description", "Acclaimed novel"),
                ("category", &category_id.to_string()),
                ("price", "thirty"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Price must be a number."));
}

#[tokio::test]
async fn nonexistent_category_reference_is_accepted() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/items/create",
            &[
                ("name", "Orphan Widget"),
                ("description", "No category exists for this"),
                ("category", &Uuid::new_v4().to_string()),
                ("price", "10"),
            ],
        )
        .await;

    // Weak reference: the id is stored as given, never existence-checked.
    let location = redirect_target(&response);
    let detail = app.get(&location).await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body = body_string(detail).await;
    assert!(body.contains("(missing)"));
}

#[tokio::test]
async fn deleting_a_referenced_category_leaves_the_item_dangling() {
    let app = TestApp::new().await;
    let category_id = seed_category(&app, "Toys").await;
    let created = app
        .state
        .services
        .items
        .create(NewItem {
            name: "Educational Toy Set".into(),
            description: "Fun and educational".into(),
            category_id,
            price: dec!(35),
            supplier_id: None,
        })
        .await
        .expect("create item");

    let response = app
        .post_form(&format!("/category/{category_id}/delete"), &[])
        .await;
    assert_eq!(redirect_target(&response), "/categories");

    // The item survives, still holding the dangling category id.
    let stored = item::Entity::find_by_id(created.id)
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("item still exists");
    assert_eq!(stored.category_id, category_id);

    // Populate resolves the dangling reference to nothing.
    let detail = app
        .state
        .services
        .items
        .get(created.id)
        .await
        .expect("get")
        .expect("detail");
    assert!(detail.category.is_none());
}

#[tokio::test]
async fn list_is_sorted_by_name_with_names_resolved() {
    let app = TestApp::new().await;
    let category_id = seed_category(&app, "Electronics").await;
    for name in ["Smartphone Galaxy S22", "Laptop Pro X"] {
        app.state
            .services
            .items
            .create(NewItem {
                name: name.into(),
                description: "gadget".into(),
                category_id,
                price: dec!(800),
                supplier_id: None,
            })
            .await
            .expect("create item");
    }

    let rows = app.state.services.items.list().await.expect("list");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].item.name, "Laptop Pro X");
    assert_eq!(rows[1].item.name, "Smartphone Galaxy S22");
    assert_eq!(rows[0].category_name.as_deref(), Some("Electronics"));
}

#[tokio::test]
async fn detail_of_unknown_id_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get(&format!("/item/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_of_missing_id_is_not_found() {
    let app = TestApp::new().await;
    let category_id = seed_category(&app, "Books").await;

    let response = app
        .post_form(
            &format!("/item/{}/update", Uuid::new_v4()),
            &[
                ("name", "Bestseller Novel"),
                ("description", "Acclaimed novel"),
                ("category", &category_id.to_string()),
                ("price", "30"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
