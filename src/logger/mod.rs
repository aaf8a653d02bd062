//! `tracing` subscriber setup from [`LoggerSettings`].
//!
//! Console output uses ANSI colors only on a terminal; the log file is
//! written in the configured [`LogFormat`], appended or truncated.

pub mod error;
pub(crate) mod writer;

#[cfg(test)]
mod tests;

pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::registry::Registry;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{FileSettings, LogFormat, LoggerSettings};
use writer::open_log_writer;

type FileLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber. Fails when both outputs are disabled or
/// a subscriber is already set.
pub fn init_logger(settings: &LoggerSettings) -> Result<(), LoggerError> {
    if !settings.console.enabled && !settings.file.enabled {
        return Err(LoggerError::config(
            "At least one output (console or file) must be enabled",
        ));
    }

    let filter = EnvFilter::try_new(settings.level.as_str())
        .map_err(|e| LoggerError::config(e.to_string()))?;

    // File layer first, so span fields are formatted without ANSI codes.
    // See: https://github.com/tokio-rs/tracing/issues/1817
    let file = if settings.file.enabled {
        Some(file_layer(&settings.file)?)
    } else {
        None
    };
    let console = settings.console.enabled.then(|| {
        fmt::layer()
            .with_ansi(settings.console.colored && std::io::stdout().is_terminal())
            .with_target(true)
            .with_level(true)
    });

    tracing_subscriber::registry()
        .with(file)
        .with(console)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::config(e.to_string()))
}

fn file_layer(file: &FileSettings) -> Result<FileLayer, LoggerError> {
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(open_log_writer(file)?);

    Ok(match file.format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    })
}
