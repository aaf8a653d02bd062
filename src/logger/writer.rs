//! Log file writer

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use crate::config::FileSettings;
use crate::logger::error::LoggerError;

/// Opens the configured log file, creating its directory first.
///
/// The returned `Mutex<File>` is a `MakeWriter` for `tracing_subscriber::fmt`.
pub fn open_log_writer(file: &FileSettings) -> Result<Mutex<File>, LoggerError> {
    if let Some(parent) = file.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let handle = OpenOptions::new()
        .create(true)
        .write(true)
        .append(file.append)
        .truncate(!file.append)
        .open(&file.path)?;

    Ok(Mutex::new(handle))
}
