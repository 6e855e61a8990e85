use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Form;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tera::Context;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::common::{parse_id_list, validate_form};
use crate::errors::{FieldError, PageError};
use crate::sanitize;
use crate::services::suppliers::NewSupplier;
use crate::{views, AppState};

/// Optional leading `+`, then digits with spaces or dashes. Length is
/// checked separately: the stored column is capped at 12 characters.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]*$").expect("phone pattern"));

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSupplierForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Items are required"))]
    pub items: Vec<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Company Name is required"))]
    pub company_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Contact Person is required"))]
    pub contact_person: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(
        length(max = 12, message = "Invalid phone number"),
        regex(path = "PHONE_RE", message = "Invalid phone number")
    )]
    pub phone: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

/// Update differs from create in one place: the item list is sanitized but
/// may be empty. Existing behavior, kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSupplierForm {
    #[serde(default)]
    pub items: Vec<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Company name must not be empty."))]
    pub company_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Contact person must not be empty."))]
    pub contact_person: String,

    #[serde(default)]
    #[validate(email(message = "Email must be a valid email address."))]
    pub email: String,

    #[serde(default)]
    #[validate(
        length(max = 12, message = "Invalid phone number"),
        regex(path = "PHONE_RE", message = "Invalid phone number")
    )]
    pub phone: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

fn clean_items(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| sanitize::clean(&item))
        .filter(|item| !item.is_empty())
        .collect()
}

impl CreateSupplierForm {
    fn sanitized(self) -> Self {
        Self {
            items: clean_items(self.items),
            company_name: sanitize::clean(&self.company_name),
            contact_person: sanitize::clean(&self.contact_person),
            email: sanitize::clean(&self.email),
            phone: sanitize::clean(&self.phone),
            address: sanitize::clean(&self.address),
        }
    }

    fn parsed(&self, errors: &mut Vec<FieldError>) -> Option<NewSupplier> {
        let items = parse_id_list(&self.items, "items", "Items must be valid ids.", errors);
        if !errors.is_empty() {
            return None;
        }
        Some(NewSupplier {
            company_name: self.company_name.clone(),
            contact_person: self.contact_person.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            items,
        })
    }
}

impl UpdateSupplierForm {
    fn sanitized(self) -> Self {
        Self {
            items: clean_items(self.items),
            company_name: sanitize::clean(&self.company_name),
            contact_person: sanitize::clean(&self.contact_person),
            email: sanitize::clean(&self.email),
            phone: sanitize::clean(&self.phone),
            address: sanitize::clean(&self.address),
        }
    }

    fn from_model(supplier: &crate::entities::supplier::Model) -> Self {
        Self {
            items: supplier.items.0.iter().map(Uuid::to_string).collect(),
            company_name: supplier.company_name.clone(),
            contact_person: supplier.contact_person.clone(),
            email: supplier.email.clone(),
            phone: supplier.phone.clone(),
            address: supplier.address.clone(),
        }
    }

    fn parsed(&self, errors: &mut Vec<FieldError>) -> Option<NewSupplier> {
        let items = parse_id_list(&self.items, "items", "Items must be valid ids.", errors);
        if !errors.is_empty() {
            return None;
        }
        Some(NewSupplier {
            company_name: self.company_name.clone(),
            contact_person: self.contact_person.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            items,
        })
    }
}

/// List row with the display form of the address precomputed.
#[derive(Debug, Serialize)]
struct SupplierRow {
    supplier: crate::entities::supplier::Model,
    address_formatted: String,
}

/// Renders the supplier form with the full item list for the multi-select.
async fn render_form<F: Serialize>(
    state: &AppState,
    title: &str,
    form: Option<&F>,
    errors: Option<&[FieldError]>,
) -> Result<Html<String>, PageError> {
    let item_list = state.services.items.list().await?;

    let mut ctx = Context::new();
    ctx.insert("title", title);
    ctx.insert("item_list", &item_list);
    if let Some(form) = form {
        ctx.insert("supplier", form);
    }
    if let Some(errors) = errors {
        ctx.insert("errors", errors);
    }
    Ok(views::render("supplier_form.html", &ctx)?)
}

/// List all suppliers.
async fn list_suppliers(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let suppliers: Vec<SupplierRow> = state
        .services
        .suppliers
        .list()
        .await?
        .into_iter()
        .map(|supplier| SupplierRow {
            address_formatted: supplier.address_formatted(),
            supplier,
        })
        .collect();

    let mut ctx = Context::new();
    ctx.insert("title", "Suppliers");
    ctx.insert("suppliers", &suppliers);
    Ok(views::render("supplier_list.html", &ctx)?)
}

/// Supplier detail page surfacing both item views: the embedded list and
/// the reverse lookup over `item.supplier_id`. The two can diverge; they
/// are rendered separately, never merged.
async fn supplier_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let detail = state
        .services
        .suppliers
        .get(id)
        .await?
        .ok_or_else(|| PageError::not_found("Supplier not found"))?;

    let mut ctx = Context::new();
    ctx.insert("title", "Supplier");
    ctx.insert("supplier", &detail.supplier);
    ctx.insert("address_formatted", &detail.supplier.address_formatted());
    ctx.insert("listed_items", &detail.listed_items);
    ctx.insert("supplying_items", &detail.supplying_items);
    Ok(views::render("supplier_detail.html", &ctx)?)
}

/// Blank create form.
async fn create_supplier_get(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    render_form::<CreateSupplierForm>(&state, "Create Supplier", None, None).await
}

/// Validate and persist a new supplier, or re-render with field errors.
async fn create_supplier_post(
    State(state): State<AppState>,
    Form(form): Form<CreateSupplierForm>,
) -> Result<Response, PageError> {
    let form = form.sanitized();
    let mut errors = validate_form(&form);
    let parsed = form.parsed(&mut errors);

    let Some(input) = parsed else {
        warn!("supplier create rejected: {} field error(s)", errors.len());
        return Ok(
            render_form(&state, "Create Supplier", Some(&form), Some(&errors))
                .await?
                .into_response(),
        );
    };

    let created = state.services.suppliers.create(input).await?;

    info!(supplier_id = %created.id, "supplier created");
    Ok(Redirect::to(&created.url()).into_response())
}

/// Update form pre-filled with the stored record.
async fn update_supplier_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let detail = state
        .services
        .suppliers
        .get(id)
        .await?
        .ok_or_else(|| PageError::not_found("Supplier not found"))?;

    let form = UpdateSupplierForm::from_model(&detail.supplier);
    render_form(&state, "Update Supplier", Some(&form), None).await
}

/// Validate and apply an update, or re-render with field errors.
async fn update_supplier_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<UpdateSupplierForm>,
) -> Result<Response, PageError> {
    let form = form.sanitized();
    let mut errors = validate_form(&form);
    let parsed = form.parsed(&mut errors);

    let Some(input) = parsed else {
        warn!("supplier update rejected: {} field error(s)", errors.len());
        return Ok(
            render_form(&state, "Update Supplier", Some(&form), Some(&errors))
                .await?
                .into_response(),
        );
    };

    let updated = state.services.suppliers.update(id, input).await?;

    info!(supplier_id = %updated.id, "supplier updated");
    Ok(Redirect::to(&updated.url()).into_response())
}

/// Delete confirmation page; a missing id falls back to the list.
async fn delete_supplier_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PageError> {
    let Some(detail) = state.services.suppliers.get(id).await? else {
        return Ok(Redirect::to("/suppliers").into_response());
    };

    let mut ctx = Context::new();
    ctx.insert("title", "Delete Supplier");
    ctx.insert("supplier", &detail.supplier);
    Ok(views::render("supplier_delete.html", &ctx)?.into_response())
}

/// Unconditional delete; items naming this supplier keep their dangling
/// reference.
async fn delete_supplier_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PageError> {
    state.services.suppliers.delete(id).await?;

    info!(supplier_id = %id, "supplier deleted");
    Ok(Redirect::to("/suppliers").into_response())
}

/// Creates the router for supplier pages.
pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(list_suppliers))
        .route(
            "/suppliers/create",
            get(create_supplier_get).post(create_supplier_post),
        )
        .route(
            "/supplier/:id/update",
            get(update_supplier_get).post(update_supplier_post),
        )
        .route(
            "/supplier/:id/delete",
            get(delete_supplier_get).post(delete_supplier_post),
        )
        .route("/supplier/:id", get(supplier_detail))
}
