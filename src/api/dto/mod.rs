//! Data Transfer Objects for API responses.
//!
//! Entity bodies are the model types themselves; this module holds the
//! shapes shared across endpoint groups.

mod error;
mod health;
mod message;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use message::MessageResponse;
