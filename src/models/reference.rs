use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reference to another entity, serialized as `{"id": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EntityRef {
    pub id: i64,
}

impl EntityRef {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl From<i64> for EntityRef {
    fn from(id: i64) -> Self {
        Self { id }
    }
}
