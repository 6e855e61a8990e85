use std::str::FromStr;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Form;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tera::Context;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::common::{parse_id_field, validate_form};
use crate::errors::{FieldError, PageError};
use crate::sanitize;
use crate::services::items::NewItem;
use crate::{views, AppState};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Description must not be empty."))]
    pub description: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Category must not be empty."))]
    pub category: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Price must not be empty."))]
    pub price: String,

    #[serde(default)]
    pub supplier: String,
}

impl ItemForm {
    fn sanitized(self) -> Self {
        Self {
            name: sanitize::clean(&self.name),
            description: sanitize::clean(&self.description),
            category: sanitize::clean(&self.category),
            price: sanitize::clean(&self.price),
            supplier: sanitize::clean(&self.supplier),
        }
    }

    fn from_model(item: &crate::entities::item::Model) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            category: item.category_id.to_string(),
            price: item.price.to_string(),
            supplier: item
                .supplier_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    /// Typed values for persistence. Malformed entries land in `errors`;
    /// the referenced ids are not existence-checked.
    fn parsed(&self, errors: &mut Vec<FieldError>) -> Option<NewItem> {
        let category_id = parse_id_field(
            &self.category,
            "category",
            "Category must be a valid id.",
            errors,
        );

        let price = if self.price.is_empty() {
            None
        } else {
            match Decimal::from_str(&self.price) {
                Ok(price) => Some(price),
                Err(_) => {
                    errors.push(FieldError::new("price", "Price must be a number."));
                    None
                }
            }
        };

        let supplier_id = parse_id_field(
            &self.supplier,
            "supplier",
            "Supplier must be a valid id.",
            errors,
        );

        match (category_id, price) {
            (Some(category_id), Some(price)) if errors.is_empty() => Some(NewItem {
                name: self.name.clone(),
                description: self.description.clone(),
                category_id,
                price,
                supplier_id,
            }),
            _ => None,
        }
    }
}

/// Renders the item form; the category and supplier selects are loaded
/// concurrently and a failure of either fails the request.
async fn render_form(
    state: &AppState,
    title: &str,
    form: Option<&ItemForm>,
    errors: Option<&[FieldError]>,
) -> Result<Html<String>, PageError> {
    let (categories, suppliers) = tokio::try_join!(
        state.services.categories.list_by_name(),
        state.services.suppliers.list_by_company(),
    )?;

    let mut ctx = Context::new();
    ctx.insert("title", title);
    ctx.insert("categories", &categories);
    ctx.insert("suppliers", &suppliers);
    if let Some(form) = form {
        ctx.insert("item", form);
    }
    if let Some(errors) = errors {
        ctx.insert("errors", errors);
    }
    Ok(views::render("item_form.html", &ctx)?)
}

/// Landing page: stock count plus the latest orders.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let (number_of_stock, last_orders) = tokio::try_join!(
        state.services.items.count(),
        state.services.orders.latest(3),
    )?;

    let mut ctx = Context::new();
    ctx.insert("title", "Inventory Management System Home");
    ctx.insert("number_of_stock", &number_of_stock);
    ctx.insert("last_orders", &last_orders);
    Ok(views::render("index.html", &ctx)?)
}

/// List all items with category and supplier names resolved.
async fn list_items(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let item_list = state.services.items.list().await?;

    let mut ctx = Context::new();
    ctx.insert("title", "Products List");
    ctx.insert("item_list", &item_list);
    Ok(views::render("item_list.html", &ctx)?)
}

/// Item detail page with both references resolved.
async fn item_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let detail = state
        .services
        .items
        .get(id)
        .await?
        .ok_or_else(|| PageError::not_found("Product doesn't exist"))?;

    let mut ctx = Context::new();
    ctx.insert("title", &detail.item.name);
    ctx.insert("item", &detail.item);
    ctx.insert("category", &detail.category);
    ctx.insert("supplier", &detail.supplier);
    Ok(views::render("item_detail.html", &ctx)?)
}

/// Blank create form.
async fn create_item_get(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    render_form(&state, "Create Item", None, None).await
}

/// Validate and persist a new item, or re-render with field errors and the
/// re-supplied select lists.
async fn create_item_post(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> Result<Response, PageError> {
    let form = form.sanitized();
    let mut errors = validate_form(&form);
    let parsed = form.parsed(&mut errors);

    let Some(input) = parsed else {
        warn!("item create rejected: {} field error(s)", errors.len());
        return Ok(render_form(&state, "Create Item", Some(&form), Some(&errors))
            .await?
            .into_response());
    };

    let created = state.services.items.create(input).await?;

    info!(item_id = %created.id, "item created");
    Ok(Redirect::to(&created.url()).into_response())
}

/// Update form pre-filled with the stored record.
async fn update_item_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let detail = state
        .services
        .items
        .get(id)
        .await?
        .ok_or_else(|| PageError::not_found("Items not found"))?;

    let form = ItemForm::from_model(&detail.item);
    render_form(&state, "Update Item", Some(&form), None).await
}

/// Validate and apply an update, or re-render with field errors.
async fn update_item_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<ItemForm>,
) -> Result<Response, PageError> {
    let form = form.sanitized();
    let mut errors = validate_form(&form);
    let parsed = form.parsed(&mut errors);

    let Some(input) = parsed else {
        warn!("item update rejected: {} field error(s)", errors.len());
        return Ok(render_form(&state, "Update Item", Some(&form), Some(&errors))
            .await?
            .into_response());
    };

    let updated = state.services.items.update(id, input).await?;

    info!(item_id = %updated.id, "item updated");
    Ok(Redirect::to(&updated.url()).into_response())
}

/// Delete confirmation page; a missing id falls back to the list.
async fn delete_item_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PageError> {
    let Some(detail) = state.services.items.get(id).await? else {
        return Ok(Redirect::to("/items").into_response());
    };

    let mut ctx = Context::new();
    ctx.insert("title", "Delete Item");
    ctx.insert("item", &detail.item);
    Ok(views::render("item_delete.html", &ctx)?.into_response())
}

/// Unconditional delete; orders and supplier lists referencing the item
/// keep their dangling references.
async fn delete_item_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PageError> {
    state.services.items.delete(id).await?;

    info!(item_id = %id, "item deleted");
    Ok(Redirect::to("/items").into_response())
}

/// Creates the router for item pages.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/create", get(create_item_get).post(create_item_post))
        .route(
            "/item/:id/update",
            get(update_item_get).post(update_item_post),
        )
        .route(
            "/item/:id/delete",
            get(delete_item_get).post(delete_item_post),
        )
        .route("/item/:id", get(item_detail))
}
