use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser, StoreError};

/// Utility for converting database errors into the service's error types.
///
/// Reads go through [`convert_diesel_error`](Self::convert_diesel_error) and
/// end up as an [`AppError`]; writes go through
/// [`classify_write_error`](Self::classify_write_error) so that constraint
/// violations surface as a typed [`StoreError`] the handlers can phrase.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match Self::classify_write_error(error, operation) {
            StoreError::UniqueViolation { field, value } => AppError::Conflict {
                message: format!("{} '{}' already exists", field, value),
            },
            StoreError::ReferenceViolation { field } => AppError::Conflict {
                message: format!("reference '{}' is violated", field),
            },
            StoreError::Failure(err) => err,
        }
    }

    /// Classifies a Diesel error raised by an insert, update or delete.
    pub fn classify_write_error(error: DieselError, operation: &str) -> StoreError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::classify_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => StoreError::Failure(AppError::NotFound {
                message: format!("no row affected by {}", operation),
            }),
            other => StoreError::Failure(AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            }),
        }
    }

    fn classify_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> StoreError {
        let message = info.message();
        let details = info.details();
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                match ConstraintParser::parse_unique_violation(message, details, constraint_name) {
                    Some((field, value)) => StoreError::UniqueViolation { field, value },
                    None => StoreError::UniqueViolation {
                        field: constraint_name.unwrap_or("unknown").to_string(),
                        value: "duplicate_value".to_string(),
                    },
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                match ConstraintParser::parse_foreign_key_violation(
                    message,
                    details,
                    constraint_name,
                ) {
                    Some((_table, field)) => StoreError::ReferenceViolation { field },
                    None => StoreError::ReferenceViolation {
                        field: constraint_name.unwrap_or("unknown").to_string(),
                    },
                }
            }
            _ => StoreError::Failure(AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", message)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        constraint_name: Option<String>,
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(
        kind: DatabaseErrorKind,
        message: &str,
        details: Option<&str>,
        constraint: Option<&str>,
    ) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: message.to_string(),
                details: details.map(str::to_string),
                constraint_name: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_classify_unique_violation() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"user_roles_name_key\"",
            Some("Key (name)=(ADMIN) already exists."),
            Some("user_roles_name_key"),
        );

        match DatabaseErrorConverter::classify_write_error(error, "insert user role") {
            StoreError::UniqueViolation { field, value } => {
                assert_eq!(field, "name");
                assert_eq!(value, "ADMIN");
            }
            other => panic!("Expected UniqueViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_foreign_key_violation() {
        let error = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "update or delete on table \"user_roles\" violates foreign key constraint \"app_users_user_role_id_fkey\" on table \"app_users\"",
            Some("Key (id)=(1) is still referenced from table \"app_users\"."),
            Some("app_users_user_role_id_fkey"),
        );

        match DatabaseErrorConverter::classify_write_error(error, "delete user role") {
            StoreError::ReferenceViolation { field } => assert_eq!(field, "user_role_id"),
            other => panic!("Expected ReferenceViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_unique_violation_is_still_a_conflict() {
        let error = database_error(DatabaseErrorKind::UniqueViolation, "weird", None, None);
        assert!(matches!(
            DatabaseErrorConverter::classify_write_error(error, "insert"),
            StoreError::UniqueViolation { .. }
        ));
    }

    #[test]
    fn test_other_database_errors_are_failures() {
        let error = database_error(
            DatabaseErrorKind::SerializationFailure,
            "could not serialize access",
            None,
            None,
        );

        match DatabaseErrorConverter::classify_write_error(error, "update plan") {
            StoreError::Failure(AppError::Database { operation, .. }) => {
                assert_eq!(operation, "update plan")
            }
            other => panic!("Expected Database failure, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_diesel_error_maps_constraints_to_conflict() {
        let error = database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key",
            Some("Key (username)=(ana) already exists."),
            None,
        );
        let converted = DatabaseErrorConverter::convert_diesel_error(error, "insert app user");
        assert!(matches!(converted, AppError::Conflict { .. }));
        assert_eq!(converted.code(), "CONFLICT");
    }

    #[test]
    fn test_convert_rollback_error_is_database_error() {
        let converted =
            DatabaseErrorConverter::convert_diesel_error(DieselError::RollbackTransaction, "tx");
        assert!(matches!(converted, AppError::Database { .. }));
    }
}
