//! Theme request handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::THEME_TAG;
use crate::api::dto::{ErrorResponse, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::models::{Theme, ThemeInput, ThemePatch};
use crate::services::PatchOutcome;
use crate::state::AppState;
use crate::utils::{PatchJson, ValidPath, ValidatedJson};

const NONE_FOUND: &str = "Nenhum tema encontrado.";
const NOT_FOUND: &str = "Tema não encontrado.";
const DUPLICATE: &str = "Tema com esse nome já existente.";
const UPDATED: &str = "Tema atualizado com sucesso.";
const DELETED: &str = "Tema deletado com sucesso.";
const REFERENCED: &str = "Existem dependências para esse tema. Mude-as para excluir esse tema.";

pub fn theme_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_all))
        .routes(routes!(get_by_id))
        .routes(routes!(get_by_name))
        .routes(routes!(insert))
        .routes(routes!(update, patch))
        .routes(routes!(delete))
}

#[utoipa::path(
    get,
    path = "/get-all",
    tag = THEME_TAG,
    responses(
        (status = 200, description = "All themes", body = Vec<Theme>),
        (status = 404, description = "No theme stored", body = ErrorResponse)
    )
)]
async fn get_all(State(state): State<AppState>) -> AppResult<Json<Vec<Theme>>> {
    let themes = state.services.themes.list().await?;
    if themes.is_empty() {
        return Err(AppError::not_found(NONE_FOUND));
    }
    Ok(Json(themes))
}

#[utoipa::path(
    get,
    path = "/get-by-id/{id}",
    tag = THEME_TAG,
    params(("id" = i64, Path, description = "Theme id")),
    responses(
        (status = 200, description = "Theme found", body = Theme),
        (status = 404, description = "Theme not found", body = ErrorResponse)
    )
)]
async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<Theme>> {
    state
        .services
        .themes
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[utoipa::path(
    get,
    path = "/get-by-name/{name}",
    tag = THEME_TAG,
    params(("name" = String, Path, description = "Theme name, any case")),
    responses(
        (status = 200, description = "Theme found", body = Theme),
        (status = 404, description = "Theme not found", body = ErrorResponse)
    )
)]
async fn get_by_name(
    State(state): State<AppState>,
    ValidPath(name): ValidPath<String>,
) -> AppResult<Json<Theme>> {
    state
        .services
        .themes
        .get_by_name(&name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[utoipa::path(
    post,
    path = "/insert",
    tag = THEME_TAG,
    request_body = ThemeInput,
    responses(
        (status = 201, description = "Theme created", body = Theme),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "Name already in use, ignoring case", body = ErrorResponse)
    )
)]
async fn insert(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ThemeInput>,
) -> AppResult<(StatusCode, Json<Theme>)> {
    let theme = state
        .services
        .themes
        .insert(input)
        .await
        .map_err(|e| e.into_conflict(DUPLICATE))?;
    Ok((StatusCode::CREATED, Json(theme)))
}

#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = THEME_TAG,
    params(("id" = i64, Path, description = "Theme id")),
    request_body = ThemeInput,
    responses(
        (status = 200, description = "Theme updated", body = Theme),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Theme not found", body = ErrorResponse),
        (status = 409, description = "Name already in use, ignoring case", body = ErrorResponse)
    )
)]
async fn update(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    ValidatedJson(input): ValidatedJson<ThemeInput>,
) -> AppResult<Json<Theme>> {
    state
        .services
        .themes
        .update(id, input)
        .await
        .map_err(|e| e.into_conflict(DUPLICATE))?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[utoipa::path(
    patch,
    path = "/update/{id}",
    tag = THEME_TAG,
    params(("id" = i64, Path, description = "Theme id")),
    request_body = ThemePatch,
    responses(
        (status = 200, description = "Theme updated", body = MessageResponse),
        (status = 400, description = "Unknown field, wrong type or invalid value", body = ErrorResponse),
        (status = 404, description = "Theme not found", body = ErrorResponse),
        (status = 409, description = "Name already in use, ignoring case", body = ErrorResponse)
    )
)]
async fn patch(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    PatchJson(patch): PatchJson<ThemePatch>,
) -> AppResult<Json<MessageResponse>> {
    let outcome = state
        .services
        .themes
        .patch(id, patch)
        .await
        .map_err(|e| e.into_conflict(DUPLICATE))?;

    match outcome {
        PatchOutcome::NotFound => Err(AppError::not_found(NOT_FOUND)),
        PatchOutcome::Invalid(errors) => Err(AppError::ValidationFailed { errors }),
        PatchOutcome::Saved(_) => Ok(Json(MessageResponse::new(UPDATED))),
    }
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = THEME_TAG,
    params(("id" = i64, Path, description = "Theme id")),
    responses(
        (status = 200, description = "Theme deleted", body = MessageResponse),
        (status = 404, description = "Theme not found", body = ErrorResponse),
        (status = 409, description = "Theme still referenced", body = ErrorResponse)
    )
)]
async fn delete(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state
        .services
        .themes
        .delete(id)
        .await
        .map_err(|e| e.into_conflict(REFERENCED))?;
    if !deleted {
        return Err(AppError::not_found(NOT_FOUND));
    }
    Ok(Json(MessageResponse::new(DELETED)))
}
