use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Form;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tera::Context;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::common::{parse_id_list, validate_form};
use crate::entities::order::OrderStatus;
use crate::errors::{FieldError, PageError};
use crate::sanitize;
use crate::services::orders::NewOrder;
use crate::{views, AppState};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Items are required"))]
    pub items: Vec<String>,

    #[serde(default)]
    pub order_date: String,

    #[serde(default)]
    pub status: String,
}

impl OrderForm {
    fn sanitized(self) -> Self {
        Self {
            items: self
                .items
                .into_iter()
                .map(|item| sanitize::clean(&item))
                .filter(|item| !item.is_empty())
                .collect(),
            order_date: sanitize::clean(&self.order_date),
            status: sanitize::clean(&self.status),
        }
    }

    fn from_model(order: &crate::entities::order::Model) -> Self {
        Self {
            items: order.items.0.iter().map(Uuid::to_string).collect(),
            order_date: order
                .order_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
            status: order.status.clone(),
        }
    }

    /// Typed values for persistence. The date is optional but must parse
    /// when present; the status must be one of the three known values.
    /// Item ids are not existence-checked.
    fn parsed(&self, errors: &mut Vec<FieldError>) -> Option<NewOrder> {
        let items = parse_id_list(&self.items, "items", "Items must be valid ids.", errors);

        let order_date = if self.order_date.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(&self.order_date, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(FieldError::new("order_date", "Invalid order date"));
                    None
                }
            }
        };

        let status = match OrderStatus::parse(&self.status) {
            Some(status) => Some(status),
            None => {
                errors.push(FieldError::new("status", "Invalid order status"));
                None
            }
        };

        match status {
            Some(status) if errors.is_empty() => Some(NewOrder {
                items,
                order_date,
                status,
            }),
            _ => None,
        }
    }
}

/// Renders the order form with the full item list for the multi-select.
async fn render_form(
    state: &AppState,
    title: &str,
    submit_button: &str,
    form: Option<&OrderForm>,
    errors: Option<&[FieldError]>,
) -> Result<Html<String>, PageError> {
    let item_list = state.services.items.list().await?;
    let statuses: Vec<String> = OrderStatus::iter().map(|s| s.to_string()).collect();

    let mut ctx = Context::new();
    ctx.insert("title", title);
    ctx.insert("submit_button", submit_button);
    ctx.insert("item_list", &item_list);
    ctx.insert("statuses", &statuses);
    if let Some(form) = form {
        ctx.insert("order", form);
    }
    if let Some(errors) = errors {
        ctx.insert("errors", errors);
    }
    Ok(views::render("order_form.html", &ctx)?)
}

/// List all orders ascending by date, with totals.
async fn list_orders(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let orders = state.services.orders.list().await?;

    let mut ctx = Context::new();
    ctx.insert("title", "Orders");
    ctx.insert("orders", &orders);
    Ok(views::render("order_list.html", &ctx)?)
}

/// Order detail page with resolved items and the derived total.
async fn order_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let view = state
        .services
        .orders
        .get(id)
        .await?
        .ok_or_else(|| PageError::not_found("Order doesn't exist"))?;

    let mut ctx = Context::new();
    ctx.insert("title", "Order");
    ctx.insert("view", &view);
    Ok(views::render("order_detail.html", &ctx)?)
}

/// Blank create form.
async fn create_order_get(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    render_form(&state, "Create an Order", "Order now", None, None).await
}

/// Validate and persist a new order, or re-render with field errors.
/// Referenced item ids are saved as given; existence is not re-verified.
async fn create_order_post(
    State(state): State<AppState>,
    Form(form): Form<OrderForm>,
) -> Result<Response, PageError> {
    let form = form.sanitized();
    let mut errors = validate_form(&form);
    let parsed = form.parsed(&mut errors);

    let Some(input) = parsed else {
        warn!("order create rejected: {} field error(s)", errors.len());
        return Ok(
            render_form(&state, "Create an Order", "Order now", Some(&form), Some(&errors))
                .await?
                .into_response(),
        );
    };

    let created = state.services.orders.create(input).await?;

    info!(order_id = %created.id, "order created");
    Ok(Redirect::to(&created.url()).into_response())
}

/// Update form pre-filled with the stored record.
async fn update_order_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let view = state
        .services
        .orders
        .get(id)
        .await?
        .ok_or_else(|| PageError::not_found("Order not found"))?;

    let form = OrderForm::from_model(&view.order);
    render_form(&state, "Update Order", "Update Order", Some(&form), None).await
}

/// Validate and apply an update, or re-render with field errors. Any status
/// may replace any other; there is no transition graph.
async fn update_order_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<OrderForm>,
) -> Result<Response, PageError> {
    let form = form.sanitized();
    let mut errors = validate_form(&form);
    let parsed = form.parsed(&mut errors);

    let Some(input) = parsed else {
        warn!("order update rejected: {} field error(s)", errors.len());
        return Ok(
            render_form(&state, "Update Order", "Update Order", Some(&form), Some(&errors))
                .await?
                .into_response(),
        );
    };

    let updated = state.services.orders.update(id, input).await?;

    info!(order_id = %updated.id, "order updated");
    Ok(Redirect::to(&updated.url()).into_response())
}

/// Delete confirmation page; a missing id falls back to the list.
async fn delete_order_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PageError> {
    let Some(view) = state.services.orders.get(id).await? else {
        return Ok(Redirect::to("/orders").into_response());
    };

    let mut ctx = Context::new();
    ctx.insert("title", "Delete Order");
    ctx.insert("view", &view);
    Ok(views::render("order_delete.html", &ctx)?.into_response())
}

/// Unconditional delete.
async fn delete_order_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PageError> {
    state.services.orders.delete(id).await?;

    info!(order_id = %id, "order deleted");
    Ok(Redirect::to("/orders").into_response())
}

/// Creates the router for order pages.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route(
            "/orders/create",
            get(create_order_get).post(create_order_post),
        )
        .route(
            "/order/:id/update",
            get(update_order_get).post(update_order_post),
        )
        .route(
            "/order/:id/delete",
            get(delete_order_get).post(delete_order_post),
        )
        .route("/order/:id", get(order_detail))
}
