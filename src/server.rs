//! HTTP server lifecycle: startup, optional migrations, graceful shutdown.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::Settings;
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// Pool creation, migration, bind and serve failures.
    pub async fn run(self) -> anyhow::Result<()> {
        self.log_configuration();

        let database = &self.settings.database;
        if database.auto_migrate {
            let applied = run_pending_migrations(&database.url).await?;
            tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
        }

        let pool = establish_async_connection_pool(database).await?;
        tracing::info!("Database connection pool initialized");

        let router = create_router(AppState::new(pool), self.settings.server.request_timeout());

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;
        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    fn log_configuration(&self) {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %settings.environment,
            "Application starting"
        );
        tracing::info!(
            host = %settings.server.host,
            port = %settings.server.port,
            request_timeout = %settings.server.request_timeout,
            "Server configuration loaded"
        );
        tracing::info!(
            url = %settings.database.redacted_url(),
            max_connections = %settings.database.max_connections,
            min_connections = %settings.database.min_connections,
            connection_timeout = %settings.database.connection_timeout,
            auto_migrate = %settings.database.auto_migrate,
            "Database configuration loaded"
        );
        tracing::info!(
            level = settings.logger.level.as_str(),
            console_enabled = %settings.logger.console.enabled,
            file_enabled = %settings.logger.file.enabled,
            "Logger configuration loaded"
        );
        // Request handling never consults this switch.
        tracing::info!(enabled = settings.security.enabled, "Security configuration loaded");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
