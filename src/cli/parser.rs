//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::validation::{
    validate_config_file_path, validate_host_address, validate_port, validate_rollback_steps,
};
use crate::config::{Environment, LogLevel};

/// REST API for the Delfis platform
#[derive(Parser, Debug)]
#[command(name = "delfis-api")]
#[command(about = "REST API for Delfis users, roles, plans, themes, streaks and sudoku games")]
#[command(long_about = "
delfis-api serves the Delfis REST endpoints over PostgreSQL and manages the
database schema.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    delfis-api serve

    # Bind to every interface on port 8080
    delfis-api serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    delfis-api --config /etc/delfis/production.toml serve

    # Check configuration without starting the server
    delfis-api serve --dry-run

    # Apply, preview or roll back migrations
    delfis-api migrate
    delfis-api migrate --dry-run
    delfis-api migrate --rollback 1
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Single TOML configuration file, replacing the layered config directory
    #[arg(short, long, value_name = "FILE", value_parser = validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Environment whose configuration layer is loaded
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Address to bind, e.g. 127.0.0.1 or 0.0.0.0
        #[arg(long, value_name = "ADDRESS", value_parser = validate_host_address)]
        host: Option<String>,

        /// TCP port, 1 to 65535
        #[arg(short, long, value_name = "PORT", value_parser = validate_port)]
        port: Option<u16>,

        /// Log level, overriding --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply, list or revert database migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert the last STEPS migrations (1 to 100)
        #[arg(long, value_name = "STEPS", value_parser = validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Serve {
            host: None,
            port: None,
            log_level: None,
            dry_run: false,
        }
    }
}

impl Cli {
    /// The subcommand to run; `serve` when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        <Cli as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["delfis-api"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.command(), Commands::default());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "delfis-api",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-level",
            "warning",
        ])
        .unwrap();

        assert_eq!(
            cli.command(),
            Commands::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(8080),
                log_level: Some(LogLevel::Warn),
                dry_run: false,
            }
        );
    }

    #[test]
    fn test_migrate_rollback() {
        let cli = Cli::try_parse_from(["delfis-api", "migrate", "--rollback", "2"]).unwrap();
        assert_eq!(
            cli.command(),
            Commands::Migrate {
                dry_run: false,
                rollback: Some(2),
            }
        );
    }

    #[test]
    fn test_migrate_dry_run_conflicts_with_rollback() {
        let err = Cli::try_parse_from(["delfis-api", "migrate", "--dry-run", "--rollback", "1"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let err = Cli::try_parse_from(["delfis-api", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_environment_aliases() {
        let cli = Cli::try_parse_from(["delfis-api", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));

        let cli = Cli::try_parse_from(["delfis-api", "--env", "stage", "migrate"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Staging));
    }

    #[test]
    fn test_rejects_port_zero() {
        assert!(Cli::try_parse_from(["delfis-api", "serve", "--port", "0"]).is_err());
    }
}
