use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::errors::FieldError;

/// Runs the derive-based checks and flattens the result into the ordered
/// field list templates render. All failures are collected; nothing
/// short-circuits on the first offending field.
pub fn validate_form<T: Validate>(form: &T) -> Vec<FieldError> {
    match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => collect_field_errors(&errors),
    }
}

pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            out.push(FieldError::new(field, message));
        }
    }
    out
}

/// Parses a sanitized id field, recording a field error instead of failing
/// the request. Emptiness is reported by the derive-based rules; this only
/// covers malformed values.
pub fn parse_id_field(
    value: &str,
    field: &'static str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Uuid> {
    if value.is_empty() {
        return None;
    }
    match Uuid::parse_str(value) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

/// Parses a list of sanitized id fields. One error entry covers the whole
/// list no matter how many elements are malformed.
pub fn parse_id_list(
    values: &[String],
    field: &'static str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Vec<Uuid> {
    let mut ids = Vec::with_capacity(values.len());
    let mut malformed = false;
    for value in values {
        match Uuid::parse_str(value) {
            Ok(id) => ids.push(id),
            Err(_) => malformed = true,
        }
    }
    if malformed {
        errors.push(FieldError::new(field, message));
    }
    ids
}
