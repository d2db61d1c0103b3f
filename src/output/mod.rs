//! Output and run history
//!
//! The JSON cycle report is the primary output; the JSONL history is an
//! optional record of past runs.

pub mod history;
pub mod report;

pub use history::{HistoryLog, RunRecord};
pub use report::CycleReport;
