//! Error response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::FieldErrors;

/// Standard error response format.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "code": "CONFLICT",
    "message": "Role com esse nome já existente.",
    "requestId": "4f1c2a9e-7d3b-4c55-9a0e-2b7f9d6e1a33"
}))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Field name to violation message, present on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            errors: None,
            request_id: None,
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_parts_are_omitted() {
        let json = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "Role não encontrado.")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json.get("errors").is_none());
        assert!(json.get("requestId").is_none());
    }

    #[test]
    fn test_request_id_is_camel_case() {
        let json = serde_json::to_value(
            ErrorResponse::new("CONFLICT", "x").with_request_id(Some("r-1".to_string())),
        )
        .unwrap();
        assert_eq!(json["requestId"], "r-1");
    }
}
