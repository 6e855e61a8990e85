use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use tower::ServiceExt;

use stockroom::{config::AppConfig, db, handlers::AppServices, AppState};

/// Helper harness spinning up the application router backed by an
/// in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        // A single connection keeps every query on the same in-memory store.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let db_pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("connect to in-memory sqlite");
        db::run_migrations(&db_pool).await.expect("run migrations");

        let db = Arc::new(db_pool);
        let services = AppServices::new(db.clone());
        let state = AppState {
            db,
            config: cfg,
            services,
        };

        let router = stockroom::routes().with_state(state.clone());
        Self { router, state }
    }

    pub async fn get(&self, path: &str) -> Response<Body> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .expect("build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("route request")
    }

    /// Posts an urlencoded form body. Repeat a key to send a multi-select
    /// field.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let body = fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("route request")
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Asserts a redirect and returns its target location.
pub fn redirect_target(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_string()
}
