use std::io::Write;
use std::path::Path;

use crate::config::{FileSettings, LogFormat, LoggerSettings};
use crate::logger::writer::open_log_writer;
use crate::logger::{LoggerError, init_logger};

fn file_settings(path: &Path, append: bool) -> FileSettings {
    FileSettings {
        enabled: true,
        path: path.to_path_buf(),
        append,
        format: LogFormat::Compact,
    }
}

#[test]
fn test_init_rejects_no_outputs() {
    let mut settings = LoggerSettings::default();
    settings.console.enabled = false;
    assert!(matches!(init_logger(&settings), Err(LoggerError::Config { .. })));
}

#[test]
fn test_writer_creates_directory_and_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("app.log");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "old line\n").unwrap();

    let writer = open_log_writer(&file_settings(&path, false)).unwrap();
    writer.lock().unwrap().write_all(b"new line\n").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new line\n");
}

#[test]
fn test_writer_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("app.log");
    let settings = file_settings(&path, true);

    for line in [b"first\n".as_slice(), b"second\n".as_slice()] {
        open_log_writer(&settings)
            .unwrap()
            .lock()
            .unwrap()
            .write_all(line)
            .unwrap();
    }

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
}
