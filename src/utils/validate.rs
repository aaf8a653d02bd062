use std::sync::OnceLock;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use regex::Regex;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult, FieldErrors};

/// Message recorded for a required field missing from an insert or update body.
pub const MISSING_FIELD: &str = "O campo é obrigatório.";

/// JSON body deserialized and checked against its declared constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// JSON body of a partial update.
///
/// Only deserialization happens here; the patch is validated after it is
/// merged onto the stored entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchJson<T>(pub T);

impl<T, S> FromRequest<S> for PatchJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(PatchJson(value))
    }
}

/// Path parameters whose rejection is reported as an [`AppError`] body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ValidPath(value))
    }
}

struct RejectionPatterns {
    unknown_field: Regex,
    missing_field: Regex,
    field_path: Regex,
}

fn patterns() -> Option<&'static RejectionPatterns> {
    static PATTERNS: OnceLock<Option<RejectionPatterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            Some(RejectionPatterns {
                unknown_field: Regex::new(r"unknown field `([^`]+)`").ok()?,
                missing_field: Regex::new(r"missing field `([^`]+)`").ok()?,
                field_path: Regex::new(r"target type: ([A-Za-z0-9_.\[\]]+): ").ok()?,
            })
        })
        .as_ref()
}

fn capture<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Maps a deserialization failure to the caller-facing error.
///
/// Unknown keys and wrongly typed values are `InvalidArgument`; a missing
/// required key is reported as a field violation.
fn data_error(text: &str) -> AppError {
    let Some(patterns) = patterns() else {
        return AppError::invalid_argument("Corpo da requisição inválido.");
    };

    if let Some(field) = capture(&patterns.unknown_field, text) {
        return AppError::invalid_argument(format!("Campo {field} não é atualizável."));
    }
    if let Some(field) = capture(&patterns.missing_field, text) {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), MISSING_FIELD.to_string());
        return AppError::ValidationFailed { errors };
    }
    match capture(&patterns.field_path, text) {
        Some(field) => AppError::invalid_argument(format!("Valor inválido para o campo {field}.")),
        None => AppError::invalid_argument("Valor inválido no corpo da requisição."),
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => data_error(&err.body_text()),
            JsonRejection::JsonSyntaxError(_) => {
                AppError::invalid_argument("JSON malformado no corpo da requisição.")
            }
            JsonRejection::MissingJsonContentType(_) => {
                AppError::bad_request("Cabeçalho Content-Type deve ser application/json.")
            }
            other => AppError::bad_request(other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::invalid_argument(format!(
            "Parâmetro de caminho inválido: {}",
            rejection.body_text()
        ))
    }
}
