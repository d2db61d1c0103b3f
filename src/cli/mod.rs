//! CLI output formatting
//!
//! Provides human-readable terminal display for enumeration runs: progress,
//! summaries, sequence listings and the ASCII grid plot.

pub mod display;
pub mod grid;
pub mod selection;

pub use display::RunDisplay;
pub use grid::GridView;
pub use selection::{parse_selection, Selection};
