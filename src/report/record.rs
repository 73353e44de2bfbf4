// Log records and the single-line formatter shared by root and node logs

use crate::error::{ReportError, ReportResult};
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::Level;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A single log entry destined for a log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    level: Level,
    message: String,
    time: DateTime<Local>,
}

impl LogRecord {
    /// Create a record stamped with the current time
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self::at(level, message, Local::now())
    }

    /// Create a record with a caller-supplied timestamp
    pub fn at(level: Level, message: impl Into<String>, time: DateTime<Local>) -> Self {
        Self {
            level,
            message: message.into(),
            time,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::INFO, message)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn time(&self) -> DateTime<Local> {
        self.time
    }

    /// Render as one line, including the trailing newline
    pub fn format(&self) -> String {
        format!(
            "{} {:<5} {}\n",
            self.time.format(TIMESTAMP_FORMAT),
            self.level.as_str(),
            escape_line_breaks(&self.message)
        )
    }
}

fn escape_line_breaks(message: &str) -> String {
    message.replace('\r', "\\r").replace('\n', "\\n")
}

/// Append one record to `path`.
///
/// The file is opened, written once and closed again before returning.
pub fn append_record(path: &Path, record: &LogRecord) -> ReportResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ReportError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

    file.write_all(record.format().as_bytes())
        .map_err(|source| ReportError::FileOpen {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_format_single_line() {
        let record = LogRecord::at(Level::INFO, "Started", fixed_time());
        assert_eq!(record.level(), Level::INFO);
        assert_eq!(record.message(), "Started");
        assert_eq!(record.time(), fixed_time());
        assert_eq!(record.format(), "2024-01-02 03:04:05.000 INFO  Started\n");
    }

    #[test]
    fn test_format_escapes_line_breaks() {
        let record = LogRecord::at(Level::ERROR, "first\r\nsecond", fixed_time());
        let line = record.format();
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with("ERROR first\\r\\nsecond\n"));
    }

    #[test]
    fn test_append_record_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".log");

        append_record(&path, &LogRecord::info("one")).unwrap();
        append_record(&path, &LogRecord::info("two")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO  one"));
        assert!(lines[1].ends_with("INFO  two"));
    }

    #[test]
    fn test_append_record_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join(".log");

        let err = append_record(&path, &LogRecord::info("lost")).unwrap_err();
        assert!(matches!(err, ReportError::FileOpen { .. }));
        assert_eq!(err.path(), &path);
    }
}
