//! Terminal display for enumeration runs
//!
//! All output goes to stderr so stdout remains clean for the JSON report.

use std::io::Write;
use std::time::Duration;

use colored::{Color, Colorize};

use super::selection::Selection;
use crate::cycle::{Enumeration, ProgressObserver};

/// Colors cycled through by result index
const PALETTE: [Color; 12] = [
    Color::BrightRed,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightBlue,
    Color::BrightMagenta,
    Color::BrightCyan,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

/// Longest sequence text shown in a listing line before truncation
const LISTING_WIDTH: usize = 50;

/// Palette color for the result at `index`
#[must_use]
pub const fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Display handler for a single enumeration run
pub struct RunDisplay {
    base: u64,
    quiet: bool,
    last_percent: Option<u64>,
}

impl RunDisplay {
    /// Create a display for the given modulus. A quiet display prints nothing
    /// except warnings.
    #[must_use]
    pub const fn new(base: u64, quiet: bool) -> Self {
        Self {
            base,
            quiet,
            last_percent: None,
        }
    }

    /// Warn that the modulus is large and the run may take a while
    pub fn print_large_base_warning(&self) {
        eprintln!(
            "{} modulus {} is very large, computation may take a long time...",
            "Warning:".yellow().bold(),
            self.base
        );
    }

    /// Print the post-run summary
    pub fn print_summary(&self, found: usize, elapsed: Duration) {
        if self.quiet {
            return;
        }
        eprintln!("{}", "─".repeat(50).dimmed());
        eprintln!("  {} {}", "COMPLETED".green().bold(), "enumeration".bold());
        eprintln!("  {} {}", "Modulus:".dimmed(), self.base);
        eprintln!("  {} {found} distinct cycle(s)", "Found:".dimmed());
        eprintln!("  {} {} ms", "Elapsed:".dimmed(), elapsed.as_millis());
    }

    /// Print a note about where the report was saved
    pub fn print_saved(&self, path: &std::path::Path) {
        if self.quiet {
            return;
        }
        eprintln!("  {} {}", "Saved:".dimmed(), path.display());
    }

    /// Warn about selection entries that fell outside the result list
    pub fn print_skipped(&self, skipped: &[String], count: usize) {
        for entry in skipped {
            eprintln!(
                "{} selection '{entry}' is outside the valid range [0, {}]",
                "Warning:".yellow().bold(),
                count.saturating_sub(1)
            );
        }
    }

    /// Print one line per discovered cycle, marking those in `selection`
    pub fn print_listing(&self, enumeration: &Enumeration, selection: Option<&Selection>) {
        eprintln!("{}", "=".repeat(70));
        eprintln!(
            "{}",
            format!("All sequences ({} total):", enumeration.len()).bold()
        );
        eprintln!("{}", "=".repeat(70));
        for (idx, cycle) in enumeration.cycles.iter().enumerate() {
            let selected = selection.is_some_and(|sel| sel.contains(idx));
            let line = listing_line(idx, &cycle.sequence(), selected);
            eprintln!("{}", line.color(palette_color(idx)));
        }
        eprintln!("{}", "=".repeat(70));
    }

    /// Print a rendered grid with its legend
    pub fn print_grid(&self, legend: &[(usize, usize)], grid: &str) {
        eprintln!("{}", "=".repeat(70));
        eprintln!("{}", format!("Grid (mod {})", self.base).bold());
        eprintln!("{}", "=".repeat(70));
        let legend_line = legend
            .iter()
            .map(|&(idx, len)| format!("[{idx}]({len})").color(palette_color(idx)).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        eprintln!("{} {legend_line}\n", "Legend:".bold());
        eprint!("{grid}");
        eprintln!("{}", "=".repeat(70));
        eprintln!("██ = state on a selected cycle, ░░ = empty");
    }
}

impl ProgressObserver for RunDisplay {
    fn update(&mut self, percent: u64) {
        if self.quiet || self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);
        eprint!("\r{} {percent}%", "Progress:".dimmed());
        if percent >= 100 {
            eprintln!();
        }
        let _ = std::io::stderr().flush();
    }
}

/// Format one listing line: selection mark, index, length, and the (possibly truncated) sequence.
fn listing_line(idx: usize, sequence: &[u64], selected: bool) -> String {
    let text = format!("{sequence:?}");
    let shown = if text.len() > LISTING_WIDTH {
        format!("{}...", &text[..LISTING_WIDTH])
    } else {
        text
    };
    let mark = if selected { '✓' } else { ' ' };
    format!("[{mark}] {idx:3}. len={:3} | {shown}", sequence.len())
}
