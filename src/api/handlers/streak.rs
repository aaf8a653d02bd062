//! Streak request handlers.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use chrono::NaiveDate;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::STREAK_TAG;
use crate::api::dto::{ErrorResponse, MessageResponse};
use crate::error::{AppError, AppResult, StoreError};
use crate::models::{Streak, StreakInput, StreakPatch, StreakResponse};
use crate::services::PatchOutcome;
use crate::state::AppState;
use crate::utils::{PatchJson, ValidPath, ValidatedJson};

const NONE_FOUND: &str = "Nenhum streak encontrado.";
const NONE_BEFORE_DATE: &str = "Nenhum streak encontrado com a data inicial fornecida.";
const NONE_FOR_USER: &str = "Nenhum streak encontrado para o usuário fornecido.";
const NOT_FOUND: &str = "Streak não encontrado.";
const DUPLICATE: &str = "Streak já existente.";
const UNKNOWN_USER: &str = "Usuário informado não existe.";
const UPDATED: &str = "Streak atualizado com sucesso.";
const DELETED: &str = "Streak deletado com sucesso.";
const REFERENCED: &str =
    "Existem usuários cadastrados com esse streak. Mude-os para excluir esse streak.";

fn write_conflict(error: StoreError) -> AppError {
    error.into_conflict_with(DUPLICATE, |_| UNKNOWN_USER.to_string())
}

fn listing(streaks: Vec<Streak>, empty: &str) -> AppResult<Json<Vec<StreakResponse>>> {
    if streaks.is_empty() {
        return Err(AppError::not_found(empty));
    }
    Ok(Json(streaks.into_iter().map(StreakResponse::from).collect()))
}

pub fn streak_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_all))
        .routes(routes!(get_by_id))
        .routes(routes!(get_by_app_user))
        .routes(routes!(get_by_initial_date_before))
        .routes(routes!(insert))
        .routes(routes!(update, patch))
        .routes(routes!(delete))
}

#[utoipa::path(
    get,
    path = "/get-all",
    tag = STREAK_TAG,
    responses(
        (status = 200, description = "All streaks", body = Vec<StreakResponse>),
        (status = 404, description = "No streak stored", body = ErrorResponse)
    )
)]
async fn get_all(State(state): State<AppState>) -> AppResult<Json<Vec<StreakResponse>>> {
    listing(state.services.streaks.list().await?, NONE_FOUND)
}

#[utoipa::path(
    get,
    path = "/get-by-id/{id}",
    tag = STREAK_TAG,
    params(("id" = i64, Path, description = "Streak id")),
    responses(
        (status = 200, description = "Streak found", body = StreakResponse),
        (status = 404, description = "Streak not found", body = ErrorResponse)
    )
)]
async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<StreakResponse>> {
    state
        .services
        .streaks
        .get(id)
        .await?
        .map(|streak| Json(StreakResponse::from(streak)))
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[utoipa::path(
    get,
    path = "/get-by-app-user/{id}",
    tag = STREAK_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Streaks of the user", body = Vec<StreakResponse>),
        (status = 404, description = "User has no streak", body = ErrorResponse)
    )
)]
async fn get_by_app_user(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<Vec<StreakResponse>>> {
    listing(state.services.streaks.list_by_app_user(id).await?, NONE_FOR_USER)
}

/// Body is a bare JSON date, e.g. `"2024-01-01"`.
#[utoipa::path(
    post,
    path = "/get-by-initial-date-before",
    tag = STREAK_TAG,
    request_body(content = String, description = "ISO date", example = json!("2024-01-01")),
    responses(
        (status = 200, description = "Streaks started before the date", body = Vec<StreakResponse>),
        (status = 400, description = "Not a date", body = ErrorResponse),
        (status = 404, description = "No streak started before the date", body = ErrorResponse)
    )
)]
async fn get_by_initial_date_before(
    State(state): State<AppState>,
    body: Result<Json<NaiveDate>, JsonRejection>,
) -> AppResult<Json<Vec<StreakResponse>>> {
    let Json(date) = body?;
    listing(
        state.services.streaks.list_started_before(date).await?,
        NONE_BEFORE_DATE,
    )
}

#[utoipa::path(
    post,
    path = "/insert",
    tag = STREAK_TAG,
    request_body = StreakInput,
    responses(
        (status = 201, description = "Streak created", body = StreakResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "Unknown user", body = ErrorResponse)
    )
)]
async fn insert(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<StreakInput>,
) -> AppResult<(StatusCode, Json<StreakResponse>)> {
    let streak = state
        .services
        .streaks
        .insert(input)
        .await
        .map_err(write_conflict)?;
    Ok((StatusCode::CREATED, Json(StreakResponse::from(streak))))
}

#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = STREAK_TAG,
    params(("id" = i64, Path, description = "Streak id")),
    request_body = StreakInput,
    responses(
        (status = 200, description = "Streak updated", body = StreakResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Streak not found", body = ErrorResponse),
        (status = 409, description = "Unknown user", body = ErrorResponse)
    )
)]
async fn update(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    ValidatedJson(input): ValidatedJson<StreakInput>,
) -> AppResult<Json<StreakResponse>> {
    state
        .services
        .streaks
        .update(id, input)
        .await
        .map_err(write_conflict)?
        .map(|streak| Json(StreakResponse::from(streak)))
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[utoipa::path(
    patch,
    path = "/update/{id}",
    tag = STREAK_TAG,
    params(("id" = i64, Path, description = "Streak id")),
    request_body = StreakPatch,
    responses(
        (status = 200, description = "Streak updated", body = MessageResponse),
        (status = 400, description = "Unknown field, wrong type or invalid value", body = ErrorResponse),
        (status = 404, description = "Streak not found", body = ErrorResponse)
    )
)]
async fn patch(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    PatchJson(patch): PatchJson<StreakPatch>,
) -> AppResult<Json<MessageResponse>> {
    let outcome = state
        .services
        .streaks
        .patch(id, patch)
        .await
        .map_err(write_conflict)?;

    match outcome {
        PatchOutcome::NotFound => Err(AppError::not_found(NOT_FOUND)),
        PatchOutcome::Invalid(errors) => Err(AppError::ValidationFailed { errors }),
        PatchOutcome::Saved(_) => Ok(Json(MessageResponse::new(UPDATED))),
    }
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = STREAK_TAG,
    params(("id" = i64, Path, description = "Streak id")),
    responses(
        (status = 200, description = "Streak deleted", body = MessageResponse),
        (status = 404, description = "Streak not found", body = ErrorResponse),
        (status = 409, description = "Streak still referenced", body = ErrorResponse)
    )
)]
async fn delete(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state
        .services
        .streaks
        .delete(id)
        .await
        .map_err(|e| e.into_conflict(REFERENCED))?;
    if !deleted {
        return Err(AppError::not_found(NOT_FOUND));
    }
    Ok(Json(MessageResponse::new(DELETED)))
}
