//! JSONL (JSON Lines) run history
//!
//! Provides append-only logging of enumeration runs to `<log_dir>/log.jsonl`

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// One completed enumeration run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRecord {
    /// The modulus that was enumerated
    pub base: u64,
    /// Number of distinct cycles found
    pub sequence_count: usize,
    /// Wall-clock time spent enumerating, in milliseconds
    pub elapsed_ms: u64,
    /// ISO 8601 timestamp of when the run completed
    pub timestamp: DateTime<Utc>,
    /// File the report was saved to, or `None` if it went to stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Append-only JSONL logger for run history
pub struct HistoryLog {
    log_path: PathBuf,
}

impl HistoryLog {
    /// Create a logger writing to `<log_dir>/log.jsonl`.
    ///
    /// # Errors
    /// Returns an error if the log directory cannot be created
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        Ok(Self {
            log_path: log_dir.join("log.jsonl"),
        })
    }

    /// Append a run record to the log
    pub fn append(&self, record: &RunRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open log file: {}", self.log_path.display()))?;

        let json = serde_json::to_string(record).context("Failed to serialize run record")?;
        writeln!(file, "{json}").context("Failed to write to log file")?;

        Ok(())
    }

    /// Read all run records, oldest first
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or any line is not valid JSON
    pub fn read_all(&self) -> Result<Vec<RunRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read log file: {}", self.log_path.display()))?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_num, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))
            })
            .collect()
    }

    /// Get the path to the log file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
