use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Form;
use serde::{Deserialize, Serialize};
use tera::Context;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::common::validate_form;
use crate::errors::{FieldError, PageError};
use crate::sanitize;
use crate::services::categories::NewCategory;
use crate::{views, AppState};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

impl CategoryForm {
    fn sanitized(self) -> Self {
        Self {
            name: sanitize::clean(&self.name),
            description: sanitize::clean(&self.description),
        }
    }
}

fn render_form(
    title: &str,
    form: Option<&CategoryForm>,
    errors: Option<&[FieldError]>,
) -> Result<Html<String>, PageError> {
    let mut ctx = Context::new();
    ctx.insert("title", title);
    if let Some(form) = form {
        ctx.insert("category", form);
    }
    if let Some(errors) = errors {
        ctx.insert("errors", errors);
    }
    Ok(views::render("category_form.html", &ctx)?)
}

/// List all categories.
async fn list_categories(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let categories = state.services.categories.list().await?;

    let mut ctx = Context::new();
    ctx.insert("title", "Categories List");
    ctx.insert("categories", &categories);
    Ok(views::render("category_list.html", &ctx)?)
}

/// Category detail page.
async fn category_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let category = state
        .services
        .categories
        .get(id)
        .await?
        .ok_or_else(|| PageError::not_found("Category not found"))?;

    let mut ctx = Context::new();
    ctx.insert("title", "Category Detail");
    ctx.insert("category", &category);
    Ok(views::render("category_detail.html", &ctx)?)
}

/// Blank create form.
async fn create_category_get() -> Result<Html<String>, PageError> {
    render_form("Create Category", None, None)
}

/// Validate and persist a new category, or re-render with field errors.
async fn create_category_post(
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, PageError> {
    let form = form.sanitized();
    let errors = validate_form(&form);

    if !errors.is_empty() {
        warn!("category create rejected: {} field error(s)", errors.len());
        return Ok(render_form("Create Category", Some(&form), Some(&errors))?.into_response());
    }

    let created = state
        .services
        .categories
        .create(NewCategory {
            name: form.name,
            description: form.description,
        })
        .await?;

    info!(category_id = %created.id, "category created");
    Ok(Redirect::to(&created.url()).into_response())
}

/// Update form pre-filled with the stored record.
async fn update_category_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let category = state
        .services
        .categories
        .get(id)
        .await?
        .ok_or_else(|| PageError::not_found("Category not found"))?;

    let form = CategoryForm {
        name: category.name,
        description: category.description,
    };
    render_form("Update Category", Some(&form), None)
}

/// Validate and apply an update, or re-render with field errors.
async fn update_category_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, PageError> {
    let form = form.sanitized();
    let errors = validate_form(&form);

    if !errors.is_empty() {
        warn!("category update rejected: {} field error(s)", errors.len());
        return Ok(render_form("Update Category", Some(&form), Some(&errors))?.into_response());
    }

    state
        .services
        .categories
        .update(
            id,
            NewCategory {
                name: form.name,
                description: form.description,
            },
        )
        .await?;

    info!(category_id = %id, "category updated");
    Ok(Redirect::to("/categories").into_response())
}

/// Delete confirmation page; a missing id falls back to the list.
async fn delete_category_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PageError> {
    let Some(category) = state.services.categories.get(id).await? else {
        return Ok(Redirect::to("/categories").into_response());
    };

    let mut ctx = Context::new();
    ctx.insert("title", "Delete Category");
    ctx.insert("category", &category);
    Ok(views::render("category_delete.html", &ctx)?.into_response())
}

/// Unconditional delete; items referencing the category keep their dangling
/// reference.
async fn delete_category_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PageError> {
    state.services.categories.delete(id).await?;

    info!(category_id = %id, "category deleted");
    Ok(Redirect::to("/categories").into_response())
}

/// Creates the router for category pages.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route(
            "/category/create",
            get(create_category_get).post(create_category_post),
        )
        .route(
            "/category/:id/update",
            get(update_category_get).post(update_category_post),
        )
        .route(
            "/category/:id/delete",
            get(delete_category_get).post(delete_category_post),
        )
        .route("/category/:id", get(category_detail))
}
