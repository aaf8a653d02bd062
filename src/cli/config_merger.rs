//! Applies CLI overrides on top of the loaded configuration.
//!
//! Precedence, lowest first: configuration files, `DELFIS_*` variables,
//! global flags (`--verbose`, `--quiet`), subcommand flags.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::{ConfigError, ConfigLoader, LogLevel, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration the CLI asks for: a single file when
    /// `--config` is given, the layered directory otherwise.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(env) = cli.env {
            loader = loader.with_environment(env);
        }
        if let Some(path) = cli.config.as_deref() {
            loader = loader.with_file(Self::readable_file(path)?);
        }
        Ok(Self::new(loader.load()?))
    }

    fn readable_file(path: &Path) -> Result<&Path, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }
        Ok(path)
    }

    /// Returns the base configuration with CLI overrides applied and
    /// re-validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = LogLevel::Debug;
        } else if cli.quiet {
            config.logger.level = LogLevel::Error;
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = *level;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn base_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/delfis_test".to_string();
        config
    }

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(base_config())
            .merge_cli_args(&cli)
            .unwrap()
    }

    #[test]
    fn test_global_log_flags() {
        assert_eq!(merge(&["delfis-api", "--verbose"]).logger.level, LogLevel::Debug);
        assert_eq!(merge(&["delfis-api", "--quiet"]).logger.level, LogLevel::Error);
    }

    #[test]
    fn test_serve_overrides_host_and_port() {
        let config = merge(&["delfis-api", "serve", "--host", "0.0.0.0", "--port", "8081"]);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_serve_log_level_beats_global_flag() {
        let config = merge(&["delfis-api", "--verbose", "serve", "--log-level", "warn"]);
        assert_eq!(config.logger.level, LogLevel::Warn);
    }

    #[test]
    fn test_migrate_leaves_server_untouched() {
        let config = merge(&["delfis-api", "migrate"]);
        assert_eq!(config.server, base_config().server);
    }

    #[test]
    fn test_invalid_base_config_fails_validation() {
        let cli = Cli::try_parse_from(["delfis-api"]).unwrap();
        let merger = ConfigurationMerger::new(Settings::default());
        assert!(merger.merge_cli_args(&cli).is_err());
    }

    #[test]
    fn test_readable_file_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ConfigurationMerger::readable_file(dir.path()),
            Err(ConfigError::FileNotFound(_))
        ));

        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(ConfigurationMerger::readable_file(file.path()).is_ok());
    }
}
