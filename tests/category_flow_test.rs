mod common;

use axum::http::StatusCode;
use uuid::Uuid;

use stockroom::services::categories::NewCategory;

use common::{body_string, redirect_target, TestApp};

#[tokio::test]
async fn create_then_fetch_round_trips_the_fields() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/category/create",
            &[
                ("name", "Electronics"),
                ("description", "Electronic devices and accessories"),
            ],
        )
        .await;

    let location = redirect_target(&response);
    assert!(location.starts_with("/category/"));

    let detail = app.get(&location).await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body = body_string(detail).await;
    assert!(body.contains("Electronics"));
    assert!(body.contains("Electronic devices and accessories"));
}

#[tokio::test]
async fn create_with_blank_fields_reports_each_field_without_persisting() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/category/create", &[("name", "   "), ("description", "")])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Category name is required"));
    assert!(body.contains("Description is required"));

    let stored = app.state.services.categories.list().await.expect("list");
    assert!(stored.is_empty());
}

#[tokio::test]
async fn input_is_trimmed_before_persisting() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/category/create",
            &[("name", "  Books  "), ("description", " Literary works ")],
        )
        .await;
    redirect_target(&response);

    let stored = app.state.services.categories.list().await.expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Books");
    assert_eq!(stored[0].description, "Literary works");
}

#[tokio::test]
async fn detail_of_unknown_id_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get(&format!("/category/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_changes_fields_and_redirects_to_the_list() {
    let app = TestApp::new().await;
    let category = app
        .state
        .services
        .categories
        .create(NewCategory {
            name: "Toys".into(),
            description: "Playful items".into(),
        })
        .await
        .expect("create");

    let response = app
        .post_form(
            &format!("/category/{}/update", category.id),
            &[("name", "Games"), ("description", "Playful items for all ages")],
        )
        .await;
    assert_eq!(redirect_target(&response), "/categories");

    let updated = app
        .state
        .services
        .categories
        .get(category.id)
        .await
        .expect("get")
        .expect("category exists");
    assert_eq!(updated.name, "Games");
}

#[tokio::test]
async fn update_of_missing_id_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            &format!("/category/{}/update", Uuid::new_v4()),
            &[("name", "Games"), ("description", "Playful items")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_succeeds_even_for_an_unknown_id() {
    let app = TestApp::new().await;

    let response = app
        .post_form(&format!("/category/{}/delete", Uuid::new_v4()), &[])
        .await;
    assert_eq!(redirect_target(&response), "/categories");
}

#[tokio::test]
async fn delete_confirmation_for_missing_id_falls_back_to_the_list() {
    let app = TestApp::new().await;

    let response = app.get(&format!("/category/{}/delete", Uuid::new_v4())).await;
    assert_eq!(redirect_target(&response), "/categories");
}
