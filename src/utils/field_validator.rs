//! Shared field-update validator.
//!
//! Turns `validator` output into the flat field-to-message map returned to
//! API callers, optionally restricted to the fields a patch touched.

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::FieldErrors;

/// Used when a constraint was declared without a message.
const DEFAULT_MESSAGE: &str = "Valor inválido.";

/// Key under which `validator` reports struct-level (schema) errors.
const SCHEMA_KEY: &str = "__all__";

/// Runs the declared constraints of `entity` and keeps the violations of
/// `touched` fields only. An empty map means the touched fields are valid.
pub fn verify_fields<T: Validate>(entity: &T, touched: &[&str]) -> FieldErrors {
    match entity.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => collect_messages(&errors, Some(touched)),
    }
}

/// Flattens validation errors to camelCase field name and first message.
///
/// Schema-level errors are attributed to the field named by their `field`
/// param. Their `involves` param lists every field the check reads; with
/// `only` set, the error is kept when any of those was touched. Nested
/// struct and list errors are reported against the parent field. With
/// `only` set, other fields are dropped.
pub fn collect_messages(errors: &ValidationErrors, only: Option<&[&str]>) -> FieldErrors {
    let mut messages = FieldErrors::new();

    for (key, kind) in errors.errors() {
        if let (true, ValidationErrorsKind::Field(list)) = (key == SCHEMA_KEY, kind) {
            for error in list {
                let field = error
                    .params
                    .get("field")
                    .and_then(|value| value.as_str())
                    .unwrap_or(SCHEMA_KEY)
                    .to_string();
                let involved = involved_fields(error, &field);
                if only.is_some_and(|fields| !involved.iter().any(|f| fields.contains(&f.as_str()))) {
                    continue;
                }
                messages.entry(field).or_insert_with(|| message_of(error));
            }
            continue;
        }

        let (field, message) = match kind {
            ValidationErrorsKind::Field(list) => {
                let Some(first) = list.first() else { continue };
                (to_camel_case(key), message_of(first))
            }
            ValidationErrorsKind::Struct(nested) => {
                (to_camel_case(key), first_nested_message(nested))
            }
            ValidationErrorsKind::List(items) => {
                let message = items
                    .values()
                    .next()
                    .map(|nested| first_nested_message(nested))
                    .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
                (to_camel_case(key), message)
            }
        };

        if only.is_some_and(|fields| !fields.contains(&field.as_str())) {
            continue;
        }
        messages.entry(field).or_insert(message);
    }

    messages
}

fn involved_fields(error: &ValidationError, field: &str) -> Vec<String> {
    let mut involved: Vec<String> = error
        .params
        .get("involves")
        .and_then(|value| value.as_array())
        .map(|names| {
            names
                .iter()
                .filter_map(|name| name.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    if !involved.iter().any(|name| name == field) {
        involved.push(field.to_string());
    }
    involved
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|message| message.to_string())
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string())
}

fn first_nested_message(errors: &ValidationErrors) -> String {
    collect_messages(errors, None)
        .into_values()
        .next()
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string())
}

/// `birth_date` -> `birthDate`
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
