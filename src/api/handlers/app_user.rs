//! User account request handlers.
//!
//! Responses use [`AppUserResponse`], which never carries the password.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::APP_USER_TAG;
use crate::api::dto::{ErrorResponse, MessageResponse};
use crate::error::{AppError, AppResult, StoreError};
use crate::models::{AppUser, AppUserInput, AppUserPatch, AppUserResponse};
use crate::services::PatchOutcome;
use crate::state::AppState;
use crate::utils::{PatchJson, ValidPath, ValidatedJson};

const NONE_FOUND: &str = "Nenhum usuário encontrado.";
const NOT_FOUND: &str = "Usuário não encontrado.";
const DUPLICATE_USERNAME: &str = "Usuário com esse nome já existente.";
const DUPLICATE_EMAIL: &str = "Usuário com esse e-mail já existente.";
const UNKNOWN_PLAN: &str = "Plano informado não existe.";
const UNKNOWN_ROLE: &str = "Role informada não existe.";
const UPDATED: &str = "Usuário atualizado com sucesso.";
const DELETED: &str = "Usuário deletado com sucesso.";
const REFERENCED: &str =
    "Existem dependências para esse usuário. Mude-as para excluir esse usuário.";

/// Phrases a write conflict by the column that caused it.
fn write_conflict(error: StoreError) -> AppError {
    match error {
        StoreError::UniqueViolation { ref field, .. } if field == "email" => {
            AppError::conflict(DUPLICATE_EMAIL)
        }
        other => other.into_conflict_with(DUPLICATE_USERNAME, |field| {
            match field {
                "plan_id" => UNKNOWN_PLAN,
                _ => UNKNOWN_ROLE,
            }
            .to_string()
        }),
    }
}

fn listing(users: Vec<AppUser>) -> AppResult<Json<Vec<AppUserResponse>>> {
    if users.is_empty() {
        return Err(AppError::not_found(NONE_FOUND));
    }
    Ok(Json(users.into_iter().map(AppUserResponse::from).collect()))
}

fn single(user: Option<AppUser>) -> AppResult<Json<AppUserResponse>> {
    user.map(|user| Json(AppUserResponse::from(user)))
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

pub fn app_user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_all))
        .routes(routes!(get_by_id))
        .routes(routes!(get_by_username))
        .routes(routes!(get_by_email))
        .routes(routes!(get_by_plan))
        .routes(routes!(get_by_user_role))
        .routes(routes!(leaderboard))
        .routes(routes!(insert))
        .routes(routes!(update, patch))
        .routes(routes!(delete))
}

#[utoipa::path(
    get,
    path = "/get-all",
    tag = APP_USER_TAG,
    responses(
        (status = 200, description = "All users", body = Vec<AppUserResponse>),
        (status = 404, description = "No user stored", body = ErrorResponse)
    )
)]
async fn get_all(State(state): State<AppState>) -> AppResult<Json<Vec<AppUserResponse>>> {
    listing(state.services.app_users.list().await?)
}

#[utoipa::path(
    get,
    path = "/get-by-id/{id}",
    tag = APP_USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = AppUserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<AppUserResponse>> {
    single(state.services.app_users.get(id).await?)
}

#[utoipa::path(
    get,
    path = "/get-by-username/{username}",
    tag = APP_USER_TAG,
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "User found", body = AppUserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_by_username(
    State(state): State<AppState>,
    ValidPath(username): ValidPath<String>,
) -> AppResult<Json<AppUserResponse>> {
    single(state.services.app_users.get_by_username(&username).await?)
}

#[utoipa::path(
    get,
    path = "/get-by-email/{email}",
    tag = APP_USER_TAG,
    params(("email" = String, Path, description = "Exact e-mail")),
    responses(
        (status = 200, description = "User found", body = AppUserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_by_email(
    State(state): State<AppState>,
    ValidPath(email): ValidPath<String>,
) -> AppResult<Json<AppUserResponse>> {
    single(state.services.app_users.get_by_email(&email).await?)
}

#[utoipa::path(
    get,
    path = "/get-by-plan/{id}",
    tag = APP_USER_TAG,
    params(("id" = i64, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Users on the plan", body = Vec<AppUserResponse>),
        (status = 404, description = "No user on the plan", body = ErrorResponse)
    )
)]
async fn get_by_plan(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<Vec<AppUserResponse>>> {
    listing(state.services.app_users.list_by_plan(id).await?)
}

#[utoipa::path(
    get,
    path = "/get-by-user-role/{id}",
    tag = APP_USER_TAG,
    params(("id" = i64, Path, description = "Role id")),
    responses(
        (status = 200, description = "Users with the role", body = Vec<AppUserResponse>),
        (status = 404, description = "No user with the role", body = ErrorResponse)
    )
)]
async fn get_by_user_role(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<Vec<AppUserResponse>>> {
    listing(state.services.app_users.list_by_user_role(id).await?)
}

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = APP_USER_TAG,
    responses(
        (status = 200, description = "Users by points, then level", body = Vec<AppUserResponse>),
        (status = 404, description = "No user stored", body = ErrorResponse)
    )
)]
async fn leaderboard(State(state): State<AppState>) -> AppResult<Json<Vec<AppUserResponse>>> {
    listing(state.services.app_users.leaderboard().await?)
}

#[utoipa::path(
    post,
    path = "/insert",
    tag = APP_USER_TAG,
    request_body = AppUserInput,
    responses(
        (status = 201, description = "User created", body = AppUserResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "Username or e-mail in use, or unknown plan or role", body = ErrorResponse)
    )
)]
async fn insert(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<AppUserInput>,
) -> AppResult<(StatusCode, Json<AppUserResponse>)> {
    let user = state
        .services
        .app_users
        .insert(input)
        .await
        .map_err(write_conflict)?;
    Ok((StatusCode::CREATED, Json(AppUserResponse::from(user))))
}

#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = APP_USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    request_body = AppUserInput,
    responses(
        (status = 200, description = "User updated", body = AppUserResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Username or e-mail in use, or unknown plan or role", body = ErrorResponse)
    )
)]
async fn update(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    ValidatedJson(input): ValidatedJson<AppUserInput>,
) -> AppResult<Json<AppUserResponse>> {
    single(
        state
            .services
            .app_users
            .update(id, input)
            .await
            .map_err(write_conflict)?,
    )
}

#[utoipa::path(
    patch,
    path = "/update/{id}",
    tag = APP_USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    request_body = AppUserPatch,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Unknown field, wrong type or invalid value", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Username in use, or unknown plan or role", body = ErrorResponse)
    )
)]
async fn patch(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    PatchJson(patch): PatchJson<AppUserPatch>,
) -> AppResult<Json<MessageResponse>> {
    let outcome = state
        .services
        .app_users
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
    tag = APP_USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "User still has streaks", body = ErrorResponse)
    )
)]
async fn delete(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state
        .services
        .app_users
        .delete(id)
        .await
        .map_err(|e| e.into_conflict(REFERENCED))?;
    if !deleted {
        return Err(AppError::not_found(NOT_FOUND));
    }
    Ok(Json(MessageResponse::new(DELETED)))
}
