/// Append-only activity journal.
///
/// One line per entry, `<yyyy-MM-dd HH:mm:ss> - <message>`, written to
/// `log.txt` beside the executable. No rotation. Writes are best-effort:
/// an I/O failure is reported through tracing and otherwise ignored.
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::paths;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append a timestamped line to the journal beside the executable.
pub fn append(message: &str) {
    append_to(&paths::log_path(), message);
}

/// Append a timestamped line to an explicit journal file.
pub fn append_to(path: &Path, message: &str) {
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let line = format!("{timestamp} - {message}\n");

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(mut file) => {
            if let Err(e) = file.write_all(line.as_bytes()) {
                tracing::warn!("Failed to write journal entry: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!("Failed to open journal {}: {}", path.display(), e);
        }
    }
}

/// Open the journal in the platform's default text viewer.
/// Does nothing if no journal has been written yet.
pub fn open_viewer() {
    let path = paths::log_path();
    if !path.exists() {
        tracing::debug!("Journal does not exist yet, nothing to open");
        return;
    }

    if let Err(e) = open::that(&path) {
        tracing::error!("Failed to open journal viewer: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn entries_append_in_call_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");

        append_to(&path, "first");
        append_to(&path, "second");
        append_to(&path, "third");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));
        assert!(lines[2].ends_with("third"));
    }

    #[test]
    fn entry_carries_a_timestamp_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");

        append_to(&path, "hello");

        let contents = fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        let (timestamp, message) = line.split_once(" - ").unwrap();

        // `2024-01-01 12:00:00` is 19 characters.
        assert_eq!(timestamp.len(), 19);
        assert_eq!(message, "hello");
    }
}
