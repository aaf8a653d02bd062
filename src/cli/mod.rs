//! Command-line interface: argument parsing, configuration merging and
//! command dispatch.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands};

use crate::config::Settings;
use crate::logger::init_logger;

/// Loads the configuration files and applies the CLI overrides.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::from_cli(cli)?;
    Ok(merger.merge_cli_args(cli)?)
}

pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    Ok(init_logger(&settings.logger)?)
}
