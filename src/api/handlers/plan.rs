//! Subscription plan request handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PLAN_TAG;
use crate::api::dto::{ErrorResponse, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::models::{Plan, PlanInput, PlanPatch};
use crate::services::PatchOutcome;
use crate::state::AppState;
use crate::utils::{PatchJson, ValidPath, ValidatedJson};

const NONE_FOUND: &str = "Nenhum plano encontrado.";
const NOT_FOUND: &str = "Plano não encontrado.";
const DUPLICATE: &str = "Plano com esse nome já existente.";
const UPDATED: &str = "Plano atualizado com sucesso.";
const DELETED: &str = "Plano deletado com sucesso.";
const REFERENCED: &str =
    "Existem usuários cadastrados com esse plano. Mude-os para excluir esse plano.";

pub fn plan_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_all))
        .routes(routes!(get_by_id))
        .routes(routes!(insert))
        .routes(routes!(update, patch))
        .routes(routes!(delete))
}

#[utoipa::path(
    get,
    path = "/get-all",
    tag = PLAN_TAG,
    responses(
        (status = 200, description = "All plans", body = Vec<Plan>),
        (status = 404, description = "No plan stored", body = ErrorResponse)
    )
)]
async fn get_all(State(state): State<AppState>) -> AppResult<Json<Vec<Plan>>> {
    let plans = state.services.plans.list().await?;
    if plans.is_empty() {
        return Err(AppError::not_found(NONE_FOUND));
    }
    Ok(Json(plans))
}

#[utoipa::path(
    get,
    path = "/get-by-id/{id}",
    tag = PLAN_TAG,
    params(("id" = i64, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Plan found", body = Plan),
        (status = 404, description = "Plan not found", body = ErrorResponse)
    )
)]
async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<Plan>> {
    state
        .services
        .plans
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[utoipa::path(
    post,
    path = "/insert",
    tag = PLAN_TAG,
    request_body = PlanInput,
    responses(
        (status = 201, description = "Plan created", body = Plan),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse)
    )
)]
async fn insert(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<PlanInput>,
) -> AppResult<(StatusCode, Json<Plan>)> {
    let plan = state
        .services
        .plans
        .insert(input)
        .await
        .map_err(|e| e.into_conflict(DUPLICATE))?;
    Ok((StatusCode::CREATED, Json(plan)))
}

#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = PLAN_TAG,
    params(("id" = i64, Path, description = "Plan id")),
    request_body = PlanInput,
    responses(
        (status = 200, description = "Plan updated", body = Plan),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Plan not found", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse)
    )
)]
async fn update(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    ValidatedJson(input): ValidatedJson<PlanInput>,
) -> AppResult<Json<Plan>> {
    state
        .services
        .plans
        .update(id, input)
        .await
        .map_err(|e| e.into_conflict(DUPLICATE))?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[utoipa::path(
    patch,
    path = "/update/{id}",
    tag = PLAN_TAG,
    params(("id" = i64, Path, description = "Plan id")),
    request_body = PlanPatch,
    responses(
        (status = 200, description = "Plan updated", body = MessageResponse),
        (status = 400, description = "Unknown field, wrong type or invalid value", body = ErrorResponse),
        (status = 404, description = "Plan not found", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse)
    )
)]
async fn patch(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    PatchJson(patch): PatchJson<PlanPatch>,
) -> AppResult<Json<MessageResponse>> {
    let outcome = state
        .services
        .plans
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
    tag = PLAN_TAG,
    params(("id" = i64, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Plan deleted", body = MessageResponse),
        (status = 404, description = "Plan not found", body = ErrorResponse),
        (status = 409, description = "Plan still assigned to users", body = ErrorResponse)
    )
)]
async fn delete(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state
        .services
        .plans
        .delete(id)
        .await
        .map_err(|e| e.into_conflict(REFERENCED))?;
    if !deleted {
        return Err(AppError::not_found(NOT_FOUND));
    }
    Ok(Json(MessageResponse::new(DELETED)))
}
