//! Shared state handed to every axum handler.

use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Cloning is cheap: services and the pool are `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Used by the health check only; `None` when services run over
    /// non-database repositories.
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// Wires the PostgreSQL repositories and services over `pool`.
    pub fn new(pool: AsyncDbPool) -> Self {
        let services = Services::new(Repositories::new(pool.clone()));
        Self {
            services,
            db_pool: Some(pool),
        }
    }

    /// State over pre-built services with no database behind them.
    pub fn from_services(services: Services) -> Self {
        Self {
            services,
            db_pool: None,
        }
    }
}
