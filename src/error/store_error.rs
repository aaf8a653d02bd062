use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

use crate::error::{AppError, DatabaseErrorConverter};

/// Outcome of a failed repository write.
///
/// Constraint violations are expected results of a write and are returned
/// as values, so each handler can answer with its own conflict message.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique constraint rejected the row
    #[error("unique constraint violated on {field} = '{value}'")]
    UniqueViolation { field: String, value: String },

    /// A foreign key rejected the write: either the referenced row is
    /// missing or dependent rows still point at the deleted one
    #[error("reference constraint violated on {field}")]
    ReferenceViolation { field: String },

    /// Any other failure, surfaced as-is
    #[error(transparent)]
    Failure(#[from] AppError),
}

impl StoreError {
    /// Turns a constraint violation into a 409 with the given message and
    /// keeps any other failure untouched.
    pub fn into_conflict(self, message: &str) -> AppError {
        match self {
            StoreError::UniqueViolation { .. } | StoreError::ReferenceViolation { .. } => {
                AppError::conflict(message)
            }
            StoreError::Failure(err) => err,
        }
    }

    /// Like [`into_conflict`](Self::into_conflict) but with distinct messages
    /// for duplicates and dangling references; `reference` receives the
    /// violated foreign key column.
    pub fn into_conflict_with(
        self,
        duplicate: &str,
        reference: impl FnOnce(&str) -> String,
    ) -> AppError {
        match self {
            StoreError::UniqueViolation { .. } => AppError::conflict(duplicate),
            StoreError::ReferenceViolation { field } => AppError::conflict(reference(&field)),
            StoreError::Failure(err) => err,
        }
    }
}

/// Fallback for writes with no entity-specific conflict message.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Failure(err) => err,
            violation => AppError::conflict(violation.to_string()),
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::classify_write_error(error, "database write")
    }
}

impl From<bb8::RunError<PoolError>> for StoreError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        StoreError::Failure(AppError::from(error))
    }
}

/// Result of a repository write
pub type StoreResult<T> = Result<T, StoreError>;
