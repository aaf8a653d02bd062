//! `serve`: run the HTTP server, or only report the configuration.

use crate::config::Settings;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()?;
            return Ok(());
        }
        Server::new(self.config).run().await
    }

    /// Validates the configuration and prints what the server would use.
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid ({})", self.config.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Database: {}", self.config.database.redacted_url());
        println!("✓ Auto-migrate: {}", self.config.database.auto_migrate);
        println!("✓ Security enabled: {}", self.config.security.enabled);
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
