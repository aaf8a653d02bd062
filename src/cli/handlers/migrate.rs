//! `migrate`: apply, list or revert the embedded migrations.

use crate::config::Settings;
use crate::db;
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = self.config.database.url.as_str();

        if dry_run {
            let pending = db::pending_migrations(url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations, database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                print_list(&pending);
                println!("Run without --dry-run to apply them");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            let reverted = db::revert_migrations(url, steps).await?;
            println!("✓ Rolled back {} migration(s):", reverted.len());
            print_list(&reverted);
            return Ok(());
        }

        let applied = db::run_pending_migrations(url).await?;
        if applied.is_empty() {
            println!("✓ No migrations to apply, database is up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            print_list(&applied);
        }
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

fn print_list(names: &[String]) {
    for name in names {
        println!("  - {}", name);
    }
}
