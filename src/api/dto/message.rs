use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Confirmation body of delete and partial update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Streak atualizado com sucesso.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
