use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::error::DbErr;
use serde::Serialize;
use tracing::error;

/// One field-level validation failure. Forms collect every offending field
/// before responding; nothing is persisted while this list is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by the data layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message suitable for a rendered page. Store failures collapse to a
    /// generic message so implementation details never reach the browser.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Error type for the HTTP layer: anything a request handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    NotFound(String),

    #[error("Template error: {0}")]
    Render(#[from] tera::Error),
}

impl PageError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(err) => err.status_code(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn response_message(&self) -> String {
        match self {
            Self::Service(err) => err.response_message(),
            Self::NotFound(msg) => msg.clone(),
            Self::Render(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("request failed: {}", self);
        }

        let message = self.response_message();
        let template = if status == StatusCode::NOT_FOUND {
            "not_found.html"
        } else {
            "error.html"
        };

        let mut ctx = tera::Context::new();
        ctx.insert("title", "Error");
        ctx.insert("status", &status.as_u16());
        ctx.insert("message", &message);

        match crate::views::render(template, &ctx) {
            Ok(html) => (status, html).into_response(),
            Err(err) => {
                error!("error page render failed: {}", err);
                (status, Html(message)).into_response()
            }
        }
    }
}
