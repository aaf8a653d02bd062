//! Sudoku game handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::SUDOKU_TAG;
use crate::api::dto::{ErrorResponse, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::models::{Sudoku, SudokuDocument};
use crate::state::AppState;
use crate::utils::{ValidPath, ValidatedJson};

const NONE_FOUND: &str = "Nenhum sudoku encontrado.";
const NOT_FOUND: &str = "Sudoku não encontrado.";
const DELETED: &str = "Sudoku deletado com sucesso.";

pub fn sudoku_routes() -> OpenApiRouter<AppState> {
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
    tag = SUDOKU_TAG,
    responses(
        (status = 200, description = "All sudokus", body = Vec<Sudoku>),
        (status = 404, description = "No sudoku stored", body = ErrorResponse)
    )
)]
async fn get_all(State(state): State<AppState>) -> AppResult<Json<Vec<Sudoku>>> {
    let sudokus = state.services.sudokus.list().await?;
    if sudokus.is_empty() {
        return Err(AppError::not_found(NONE_FOUND));
    }
    Ok(Json(sudokus))
}

#[utoipa::path(
    get,
    path = "/get-by-id/{id}",
    tag = SUDOKU_TAG,
    params(("id" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Sudoku found", body = Sudoku),
        (status = 404, description = "Sudoku not found", body = ErrorResponse)
    )
)]
async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<String>,
) -> AppResult<Json<Sudoku>> {
    state
        .services
        .sudokus
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[utoipa::path(
    post,
    path = "/insert",
    tag = SUDOKU_TAG,
    request_body = SudokuDocument,
    responses(
        (status = 201, description = "Sudoku stored", body = Sudoku),
        (status = 400, description = "Invalid grid", body = ErrorResponse)
    )
)]
async fn insert(
    State(state): State<AppState>,
    ValidatedJson(document): ValidatedJson<SudokuDocument>,
) -> AppResult<(StatusCode, Json<Sudoku>)> {
    let sudoku = state
        .services
        .sudokus
        .insert(document)
        .await?;
    Ok((StatusCode::CREATED, Json(sudoku)))
}

#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = SUDOKU_TAG,
    params(("id" = String, Path, description = "Document id")),
    request_body = SudokuDocument,
    responses(
        (status = 200, description = "Sudoku replaced", body = Sudoku),
        (status = 400, description = "Invalid grid", body = ErrorResponse),
        (status = 404, description = "Sudoku not found", body = ErrorResponse)
    )
)]
async fn update(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<String>,
    ValidatedJson(document): ValidatedJson<SudokuDocument>,
) -> AppResult<Json<Sudoku>> {
    state
        .services
        .sudokus
        .update(&id, document)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = SUDOKU_TAG,
    params(("id" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Sudoku deleted", body = MessageResponse),
        (status = 404, description = "Sudoku not found", body = ErrorResponse)
    )
)]
async fn delete(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<String>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state
        .services
        .sudokus
        .delete(&id)
        .await?;
    if !deleted {
        return Err(AppError::not_found(NOT_FOUND));
    }
    Ok(Json(MessageResponse::new(DELETED)))
}
