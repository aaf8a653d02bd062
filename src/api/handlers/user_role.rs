//! Role request handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_ROLE_TAG;
use crate::api::dto::{ErrorResponse, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::models::{UserRole, UserRoleInput};
use crate::state::AppState;
use crate::utils::{ValidPath, ValidatedJson};

const NONE_FOUND: &str = "Nenhuma role encontrada.";
const NOT_FOUND: &str = "Role não encontrado.";
const DUPLICATE: &str = "Role com esse nome já existente.";
const DELETED: &str = "Role deletado com sucesso.";
const REFERENCED: &str =
    "Existem usuários cadastrados com essa role. Mude-os para excluir essa role.";

pub fn user_role_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_all))
        .routes(routes!(get_by_id))
        .routes(routes!(insert))
        .routes(routes!(update))
        .routes(routes!(delete))
}

#[utoipa::path(
    get,
    path = "/get-all",
    tag = USER_ROLE_TAG,
    responses(
        (status = 200, description = "All roles", body = Vec<UserRole>),
        (status = 404, description = "No role stored", body = ErrorResponse)
    )
)]
async fn get_all(State(state): State<AppState>) -> AppResult<Json<Vec<UserRole>>> {
    let roles = state.services.user_roles.list().await?;
    if roles.is_empty() {
        return Err(AppError::not_found(NONE_FOUND));
    }
    Ok(Json(roles))
}

#[utoipa::path(
    get,
    path = "/get-by-id/{id}",
    tag = USER_ROLE_TAG,
    params(("id" = i64, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role found", body = UserRole),
        (status = 404, description = "Role not found", body = ErrorResponse)
    )
)]
async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<UserRole>> {
    state
        .services
        .user_roles
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[utoipa::path(
    post,
    path = "/insert",
    tag = USER_ROLE_TAG,
    request_body = UserRoleInput,
    responses(
        (status = 201, description = "Role created", body = UserRole),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse)
    )
)]
async fn insert(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UserRoleInput>,
) -> AppResult<(StatusCode, Json<UserRole>)> {
    let role = state
        .services
        .user_roles
        .insert(input)
        .await
        .map_err(|e| e.into_conflict(DUPLICATE))?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Full update. Answers 201 like insert.
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = USER_ROLE_TAG,
    params(("id" = i64, Path, description = "Role id")),
    request_body = UserRoleInput,
    responses(
        (status = 201, description = "Role updated", body = UserRole),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse)
    )
)]
async fn update(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    ValidatedJson(input): ValidatedJson<UserRoleInput>,
) -> AppResult<(StatusCode, Json<UserRole>)> {
    let role = state
        .services
        .user_roles
        .update(id, input)
        .await
        .map_err(|e| e.into_conflict(DUPLICATE))?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    Ok((StatusCode::CREATED, Json(role)))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = USER_ROLE_TAG,
    params(("id" = i64, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role deleted", body = MessageResponse),
        (status = 404, description = "Role not found", body = ErrorResponse),
        (status = 409, description = "Role still assigned to users", body = ErrorResponse)
    )
)]
async fn delete(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state
        .services
        .user_roles
        .delete(id)
        .await
        .map_err(|e| e.into_conflict(REFERENCED))?;
    if !deleted {
        return Err(AppError::not_found(NOT_FOUND));
    }
    Ok(Json(MessageResponse::new(DELETED)))
}
