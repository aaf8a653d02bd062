use std::collections::BTreeMap;

use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

use crate::error::DatabaseErrorConverter;

/// Field name to first violation message, keyed by the JSON (camelCase) name.
pub type FieldErrors = BTreeMap<String, String>;

/// Application-wide error type that represents all possible errors in the system.
///
/// Client-facing variants carry the message shown to the caller as-is; the
/// infrastructure variants keep their `anyhow` source for logging and are
/// rendered with a generic message.
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested resource does not exist (or a listing came back empty)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Uniqueness or referential conflict reported by the store
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Malformed request body: unknown field or wrongly-typed value
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Declared constraints failed for one or more fields
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationFailed { errors: FieldErrors },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AppError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
        }
    }

    /// Machine-readable code used in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Conflict { .. } => "CONFLICT",
            AppError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            AppError::ValidationFailed { .. } => "VALIDATION_FAILED",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::Database { .. } => "DATABASE_ERROR",
            AppError::Configuration { .. } => "CONFIGURATION_ERROR",
            AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Whether the error is caused by the server rather than the request.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::Database { .. }
                | AppError::Configuration { .. }
                | AppError::ConnectionPool { .. }
                | AppError::Internal { .. }
        )
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<PoolError>> for AppError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::msg(error.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationFailed {
            errors: crate::utils::field_validator::collect_messages(&errors, None),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_server_classification() {
        assert_eq!(AppError::not_found("x").code(), "NOT_FOUND");
        assert_eq!(AppError::conflict("x").code(), "CONFLICT");
        assert_eq!(AppError::invalid_argument("x").code(), "INVALID_ARGUMENT");
        assert!(!AppError::conflict("x").is_server_error());

        let internal = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(internal.code(), "INTERNAL_ERROR");
        assert!(internal.is_server_error());
    }

    #[test]
    fn test_display_keeps_client_message() {
        let err = AppError::not_found("Role não encontrado.");
        assert_eq!(err.to_string(), "Not found: Role não encontrado.");
    }

    #[test]
    fn test_validation_failed_display_counts_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("name".to_string(), "must not be blank".to_string());
        let err = AppError::ValidationFailed { errors };
        assert_eq!(err.to_string(), "Validation failed for 1 field(s)");
    }
}
