use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Decision point an audit entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditCategory {
    Refused,
    DryRun,
    Aborted,
    Executed,
    ExecutionError,
}

impl AuditCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AuditCategory::Refused => "REFUSED UNSAFE",
            AuditCategory::DryRun => "DRY_RUN",
            AuditCategory::Aborted => "ABORTED",
            AuditCategory::Executed => "EXECUTED",
            AuditCategory::ExecutionError => "EXECUTION_ERROR",
        }
    }
}

impl fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the audit log
#[derive(Debug, Clone)]
pub struct AuditLogEntry {
    pub timestamp: DateTime<Utc>,
    pub category: AuditCategory,
    pub detail: String,
}

impl AuditLogEntry {
    pub fn new(category: AuditCategory, detail: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            category,
            detail: detail.into(),
        }
    }

    /// Render as `<timestamp> | <CATEGORY>: <detail>`
    ///
    /// Line breaks in the detail are escaped so one entry is always one line.
    pub fn to_line(&self) -> String {
        let detail = self.detail.replace('\r', "\\r").replace('\n', "\\n");
        format!(
            "{} | {}: {}\n",
            self.timestamp.to_rfc3339(),
            self.category,
            detail
        )
    }
}

/// Append-only audit log backed by a plain text file
///
/// Entries are never rewritten, truncated or rotated.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create an AuditLogger writing to the given path
    pub fn with_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let log_path = path.as_ref().to_path_buf();

        // Ensure directory exists
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { log_path })
    }

    /// Append one entry
    pub fn append(&self, entry: &AuditLogEntry) -> std::io::Result<()> {
        let line = entry.to_line();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(line.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    pub fn log_refused(&self, command: &str) -> std::io::Result<()> {
        self.append(&AuditLogEntry::new(AuditCategory::Refused, command))
    }

    pub fn log_dry_run(&self, command: &str) -> std::io::Result<()> {
        self.append(&AuditLogEntry::new(AuditCategory::DryRun, command))
    }

    pub fn log_aborted(&self, command: &str) -> std::io::Result<()> {
        self.append(&AuditLogEntry::new(AuditCategory::Aborted, command))
    }

    /// Log a completed execution with its exit code and captured output
    pub fn log_executed(
        &self,
        command: &str,
        exit_code: i32,
        stdout: &str,
        stderr: &str,
    ) -> std::io::Result<()> {
        let detail = format!(
            "{}\nEXIT:{}\nOUT:{}\nERR:{}",
            command,
            exit_code,
            stdout.trim(),
            stderr.trim()
        );
        self.append(&AuditLogEntry::new(AuditCategory::Executed, detail))
    }

    /// Log a command that could not be launched
    pub fn log_execution_error(&self, command: &str, error: &str) -> std::io::Result<()> {
        let detail = format!("{} -> {}", command, error);
        self.append(&AuditLogEntry::new(AuditCategory::ExecutionError, detail))
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_logger() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        assert_eq!(logger.log_path(), log_path);
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join(".ai-cli").join("logs.txt");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        logger.log_aborted("ls /workspace").unwrap();

        assert!(log_path.exists());
    }

    #[test]
    fn test_line_format() {
        let entry = AuditLogEntry::new(AuditCategory::Refused, "rm -rf /workspace");
        let line = entry.to_line();

        let (timestamp, message) = line.trim_end().split_once(" | ").unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert_eq!(message, "REFUSED UNSAFE: rm -rf /workspace");
    }

    #[test]
    fn test_multiline_detail_stays_on_one_line() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        logger
            .log_executed("ls /workspace", 0, "a.txt\nb.txt\n", "")
            .unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("EXECUTED: ls /workspace"));
        assert!(content.contains("EXIT:0"));
        assert!(content.contains("OUT:a.txt\\nb.txt"));
    }

    #[test]
    fn test_entries_are_appended() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        logger.log_refused("rm -rf /").unwrap();
        logger.log_aborted("ls /workspace").unwrap();
        logger.log_dry_run("find /workspace").unwrap();

        // A second logger on the same file keeps appending
        let other = AuditLogger::with_path(&log_path).unwrap();
        other
            .log_execution_error("find /workspace", "No such file or directory")
            .unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("REFUSED UNSAFE: rm -rf /"));
        assert!(lines[1].ends_with("ABORTED: ls /workspace"));
        assert!(lines[2].ends_with("DRY_RUN: find /workspace"));
        assert!(lines[3].ends_with("EXECUTION_ERROR: find /workspace -> No such file or directory"));
    }

    #[test]
    fn test_log_with_failed_command() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        logger
            .log_executed("ls /missing", 2, "", "ls: cannot access '/missing'")
            .unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("EXIT:2"));
        assert!(content.contains("ERR:ls: cannot access '/missing'"));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();

        // The log path is a directory, so opening it for append fails
        let logger = AuditLogger::with_path(temp_dir.path()).unwrap();
        assert!(logger.log_refused("rm -rf /").is_err());
    }
}
