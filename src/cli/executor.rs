//! Dispatches a parsed command to its handler.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;

pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    match cli.command() {
        Commands::Serve { dry_run, .. } => ServeCommandHandler::new(settings).execute(dry_run).await,
        Commands::Migrate { dry_run, rollback } => {
            if let Some(steps) = rollback.filter(|steps| *steps > 10) {
                tracing::warn!(steps, "Rolling back a large number of migrations");
            }
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await?;
            Ok(())
        }
    }
}
