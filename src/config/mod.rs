//! Configuration for delfis-api.
//!
//! [`ConfigLoader`] merges TOML layers and `DELFIS_*` variables into
//! [`Settings`], which [`Settings::validate`] checks before use.

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use error::ConfigError;
pub use loader::{ConfigLoader, Environment};
pub use settings::{
    ApplicationConfig, ConsoleSettings, DatabaseConfig, FileSettings, LogFormat, LogLevel,
    LoggerSettings, SecurityConfig, ServerConfig, Settings,
};
