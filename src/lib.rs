//! fibmod - Fibonacci cycles modulo a base
//!
//! Enumerates every distinct cycle of the recurrence `(a, b) -> (b, a + b)`
//! over pairs of residues modulo a base, and reports them as JSON.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod cycle;
pub mod output;

// Re-export commonly used types
pub use cli::{parse_selection, GridView, RunDisplay, Selection};
pub use config::RunConfig;
pub use cycle::{
    canonicalize, enumerate, Cycle, CycleEnumerator, Enumeration, NoProgress, ProgressObserver,
    State,
};
pub use output::{CycleReport, HistoryLog, RunRecord};
