//! Template registry and rendering.
//!
//! Templates are embedded at compile time and parsed once into a shared
//! [`Tera`] instance. Handlers build a [`Context`] and call [`render`];
//! derived display fields (formatted addresses, totals, date strings) are
//! computed in Rust and inserted into the context, never in templates.

use axum::response::Html;
use once_cell::sync::Lazy;
use tera::{Context, Tera};

pub static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("index.html", include_str!("../templates/index.html")),
        (
            "category_list.html",
            include_str!("../templates/category_list.html"),
        ),
        (
            "category_detail.html",
            include_str!("../templates/category_detail.html"),
        ),
        (
            "category_form.html",
            include_str!("../templates/category_form.html"),
        ),
        (
            "category_delete.html",
            include_str!("../templates/category_delete.html"),
        ),
        ("item_list.html", include_str!("../templates/item_list.html")),
        (
            "item_detail.html",
            include_str!("../templates/item_detail.html"),
        ),
        ("item_form.html", include_str!("../templates/item_form.html")),
        (
            "item_delete.html",
            include_str!("../templates/item_delete.html"),
        ),
        (
            "supplier_list.html",
            include_str!("../templates/supplier_list.html"),
        ),
        (
            "supplier_detail.html",
            include_str!("../templates/supplier_detail.html"),
        ),
        (
            "supplier_form.html",
            include_str!("../templates/supplier_form.html"),
        ),
        (
            "supplier_delete.html",
            include_str!("../templates/supplier_delete.html"),
        ),
        (
            "order_list.html",
            include_str!("../templates/order_list.html"),
        ),
        (
            "order_detail.html",
            include_str!("../templates/order_detail.html"),
        ),
        ("order_form.html", include_str!("../templates/order_form.html")),
        (
            "order_delete.html",
            include_str!("../templates/order_delete.html"),
        ),
        ("not_found.html", include_str!("../templates/not_found.html")),
        ("error.html", include_str!("../templates/error.html")),
    ])
    .expect("built-in templates must parse");
    tera
});

/// Renders one registered template into an HTML response body.
pub fn render(template: &str, ctx: &Context) -> Result<Html<String>, tera::Error> {
    TEMPLATES.render(template, ctx).map(Html)
}
