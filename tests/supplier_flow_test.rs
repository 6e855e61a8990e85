mod common;

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use uuid::Uuid;

use stockroom::services::categories::NewCategory;
use stockroom::services::items::NewItem;
use stockroom::services::suppliers::NewSupplier;

use common::{body_string, redirect_target, TestApp};

async fn seed_item(app: &TestApp, name: &str) -> Uuid {
    let category = app
        .state
        .services
        .categories
        .create(NewCategory {
            name: "Electronics".into(),
            description: "Devices".into(),
        })
        .await
        .expect("create category");

    app.state
        .services
        .items
        .create(NewItem {
            name: name.into(),
            description: "gadget".into(),
            category_id: category.id,
            price: dec!(100),
            supplier_id: None,
        })
        .await
        .expect("create item")
        .id
}

fn supplier_fields<'a>(item_id: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("items", item_id),
        ("company_name", "ElectroTech"),
        ("contact_person", "John Doe"),
        ("email", "info@electrotech.com"),
        ("phone", "123-456-7890"),
        ("address", "123 Main St, Springfield, USA"),
    ]
}

#[tokio::test]
async fn create_then_fetch_round_trips_the_fields() {
    let app = TestApp::new().await;
    let item_id = seed_item(&app, "Laptop Pro X").await.to_string();

    let response = app
        .post_form("/suppliers/create", &supplier_fields(&item_id))
        .await;

    let location = redirect_target(&response);
    assert!(location.starts_with("/supplier/"));

    let detail = app.get(&location).await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body = body_string(detail).await;
    assert!(body.contains("ElectroTech"));
    assert!(body.contains("John Doe"));
    // Address renders in its display form: city shortened to 3 characters.
    assert!(body.contains("123 Main St, Spr, USA"));
}

#[tokio::test]
async fn create_requires_a_non_empty_item_list() {
    let app = TestApp::new().await;

    let fields = [
        ("company_name", "FashionHub"),
        ("contact_person", "Jane Smith"),
        ("email", "info@fashionhub.com"),
        ("phone", "987-654-3210"),
        ("address", "456 Oak St, Town, Country"),
    ];
    let response = app.post_form("/suppliers/create", &fields).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Items are required"));

    let stored = app.state.services.suppliers.list().await.expect("list");
    assert!(stored.is_empty());
}

#[tokio::test]
async fn update_accepts_an_empty_item_list() {
    let app = TestApp::new().await;
    let item_id = seed_item(&app, "Laptop Pro X").await;
    let supplier = app
        .state
        .services
        .suppliers
        .create(NewSupplier {
            company_name: "ElectroTech".into(),
            contact_person: "John Doe".into(),
            email: "info@electrotech.com".into(),
            phone: "123-456-7890".into(),
            address: "123 Main St, City, Country".into(),
            items: vec![item_id],
        })
        .await
        .expect("create supplier");

    // Same required fields as create, but no items: accepted on update.
    let fields = [
        ("company_name", "ElectroTech"),
        ("contact_person", "John Doe"),
        ("email", "info@electrotech.com"),
        ("phone", "123-456-7890"),
        ("address", "123 Main St, City, Country"),
    ];
    let response = app
        .post_form(&format!("/supplier/{}/update", supplier.id), &fields)
        .await;
    redirect_target(&response);

    let detail = app
        .state
        .services
        .suppliers
        .get(supplier.id)
        .await
        .expect("get")
        .expect("supplier exists");
    assert!(detail.supplier.items.is_empty());
}

#[tokio::test]
async fn create_with_blank_fields_reports_each_field_without_persisting() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/suppliers/create",
            &[
                ("company_name", " "),
                ("contact_person", ""),
                ("email", ""),
                ("phone", ""),
                ("address", "  "),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Items are required"));
    assert!(body.contains("Company Name is required"));
    assert!(body.contains("Contact Person is required"));
    assert!(body.contains("Invalid email"));
    assert!(body.contains("Invalid phone number"));
    assert!(body.contains("Address is required"));

    let stored = app.state.services.suppliers.list().await.expect("list");
    assert!(stored.is_empty());
}

#[tokio::test]
async fn invalid_email_and_phone_are_field_errors() {
    let app = TestApp::new().await;
    let item_id = seed_item(&app, "Laptop Pro X").await.to_string();

    let fields = [
        ("items", item_id.as_str()),
        ("company_name", "ElectroTech"),
        ("contact_person", "John Doe"),
        ("email", "not-an-email"),
        ("phone", "12345678901234567"),
        ("address", "123 Main St, City, Country"),
    ];
    let response = app.post_form("/suppliers/create", &fields).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Invalid email"));
    assert!(body.contains("Invalid phone number"));
}

#[tokio::test]
async fn detail_surfaces_both_divergent_item_views() {
    let app = TestApp::new().await;
    let category = app
        .state
        .services
        .categories
        .create(NewCategory {
            name: "Electronics".into(),
            description: "Devices".into(),
        })
        .await
        .expect("create category");

    let supplier = app
        .state
        .services
        .suppliers
        .create(NewSupplier {
            company_name: "ElectroTech".into(),
            contact_person: "John Doe".into(),
            email: "info@electrotech.com".into(),
            phone: "123-456-7890".into(),
            address: "123 Main St, City, Country".into(),
            items: Vec::new(),
        })
        .await
        .expect("create supplier");

    // Item A names the supplier through its own field only.
    let item_a = app
        .state
        .services
        .items
        .create(NewItem {
            name: "Laptop Pro X".into(),
            description: "gadget".into(),
            category_id: category.id,
            price: dec!(1200),
            supplier_id: Some(supplier.id),
        })
        .await
        .expect("create item");

    // Item B appears only in the supplier's embedded list.
    let item_b = app
        .state
        .services
        .items
        .create(NewItem {
            name: "Smartphone Galaxy S22".into(),
            description: "gadget".into(),
            category_id: category.id,
            price: dec!(800),
            supplier_id: None,
        })
        .await
        .expect("create item");

    app.state
        .services
        .suppliers
        .update(
            supplier.id,
            NewSupplier {
                company_name: "ElectroTech".into(),
                contact_person: "John Doe".into(),
                email: "info@electrotech.com".into(),
                phone: "123-456-7890".into(),
                address: "123 Main St, City, Country".into(),
                items: vec![item_b.id],
            },
        )
        .await
        .expect("update supplier");

    // The two views stay divergent and are surfaced separately.
    let detail = app
        .state
        .services
        .suppliers
        .get(supplier.id)
        .await
        .expect("get")
        .expect("supplier exists");
    assert_eq!(detail.listed_items.len(), 1);
    assert_eq!(detail.listed_items[0].id, item_b.id);
    assert_eq!(detail.supplying_items.len(), 1);
    assert_eq!(detail.supplying_items[0].id, item_a.id);

    let page = app.get(&format!("/supplier/{}", supplier.id)).await;
    let body = body_string(page).await;
    assert!(body.contains("Laptop Pro X"));
    assert!(body.contains("Smartphone Galaxy S22"));
}

#[tokio::test]
async fn two_segment_address_renders_unchanged() {
    let app = TestApp::new().await;
    let supplier = app
        .state
        .services
        .suppliers
        .create(NewSupplier {
            company_name: "HomeGoods Inc.".into(),
            contact_person: "Bob Johnson".into(),
            email: "info@homegoods.com".into(),
            phone: "555-123-4567".into(),
            address: "123 Main St, USA".into(),
            items: Vec::new(),
        })
        .await
        .expect("create supplier");

    let page = app.get(&format!("/supplier/{}", supplier.id)).await;
    let body = body_string(page).await;
    assert!(body.contains("123 Main St, USA"));
}

#[tokio::test]
async fn detail_of_unknown_id_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get(&format!("/supplier/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_succeeds_even_for_an_unknown_id() {
    let app = TestApp::new().await;

    let response = app
        .post_form(&format!("/supplier/{}/delete", Uuid::new_v4()), &[])
        .await;
    assert_eq!(redirect_target(&response), "/suppliers");
}
