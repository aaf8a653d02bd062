//! Error handler for converting AppError to HTTP responses.
//!
//! Client errors carry their message as-is. Server errors are logged with
//! their source chain and answered with a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::api::middleware::request_id::current_request_id;
use crate::error::AppError;

/// Maps an AppError variant to its HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Conflict { .. } => StatusCode::CONFLICT,
        AppError::InvalidArgument { .. }
        | AppError::ValidationFailed { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_body(error: AppError) -> ErrorResponse {
    let code = error.code();
    match error {
        AppError::NotFound { message }
        | AppError::Conflict { message }
        | AppError::InvalidArgument { message }
        | AppError::BadRequest { message } => ErrorResponse::new(code, message),
        AppError::ValidationFailed { errors } => {
            ErrorResponse::new(code, "Dados inválidos.").with_errors(errors)
        }
        AppError::Database { .. } => ErrorResponse::new(code, "Erro ao acessar o banco de dados."),
        AppError::Configuration { .. } | AppError::Internal { .. } => {
            ErrorResponse::new(code, "Erro interno do servidor.")
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new(code, "Banco de dados indisponível no momento.")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        if self.is_server_error() {
            tracing::error!(error = ?self, code = self.code(), "Request failed");
        }

        let body = error_body(self).with_request_id(current_request_id());
        (status, Json(body)).into_response()
    }
}
