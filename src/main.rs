//! fibmod - Fibonacci cycles modulo a base
//!
//! CLI entry point: enumerates the cycles for one modulus and prints the
//! JSON report to stdout (or saves it to a file).

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;

use fibmod::cli::{parse_selection, GridView, RunDisplay, Selection};
use fibmod::config::RunConfig;
use fibmod::cycle::Enumeration;
use fibmod::output::{CycleReport, HistoryLog, RunRecord};

/// Enumerate the cycles of the Fibonacci recurrence modulo a base
///
/// Every pair of residues (a, b) is followed under (a, b) -> (b, a + b mod n)
/// until it repeats. The distinct cycles are printed as JSON.
#[derive(Parser, Debug)]
#[command(name = "fibmod", version, about)]
struct Cli {
    /// Modulus (positive integer)
    #[arg(allow_negative_numbers = true)]
    modulus: String,

    /// Save the JSON report to this file instead of printing it
    output: Option<PathBuf>,

    /// Path to a fibmod.toml with progress and warning thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append a run record to <LOG_DIR>/log.jsonl
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// List every discovered sequence on stderr
    #[arg(long)]
    list: bool,

    /// Plot the selected cycles on stderr, e.g. "all" or "0-3,5"
    #[arg(long, value_name = "SELECTION")]
    grid: Option<String>,

    /// Suppress progress and summary output
    #[arg(long, short)]
    quiet: bool,
}

/// Parse command-line arguments, exiting with status 1 on usage errors.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // help and version are not failures
            std::process::exit(i32::from(err.use_stderr()));
        }
    }
}

/// Parse the modulus argument; it must be a positive integer whose square fits in 64 bits.
fn parse_modulus(text: &str) -> Result<u64> {
    let Ok(base) = text.trim().parse::<u64>() else {
        bail!("Modulus must be a positive integer, got '{text}'");
    };
    if base == 0 {
        bail!("Modulus must be a positive integer, got '{text}'");
    }
    if base.checked_mul(base).is_none() {
        bail!("Modulus {base} is too large: its state space does not fit in 64 bits");
    }
    Ok(base)
}

/// Build a `RunRecord` for the JSONL history.
fn build_record(enumeration: &Enumeration, elapsed: Duration, output: Option<&Path>) -> RunRecord {
    RunRecord {
        base: enumeration.base,
        sequence_count: enumeration.len(),
        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        timestamp: chrono::Utc::now(),
        output: output.map(Path::to_path_buf),
    }
}

/// Parse the `--grid` selection and warn about entries outside the result list.
fn grid_selection(display: &RunDisplay, enumeration: &Enumeration, input: &str) -> Result<Selection> {
    let selection = parse_selection(input, enumeration.len())
        .with_context(|| format!("Failed to parse grid selection '{input}'"))?;
    display.print_skipped(&selection.skipped, enumeration.len());
    Ok(selection)
}

/// Render the grid plot for the selected cycles.
fn show_grid(display: &RunDisplay, enumeration: &Enumeration, selection: &Selection) {
    if selection.is_empty() {
        eprintln!("Nothing selected for the grid.");
        return;
    }

    let legend: Vec<(usize, usize)> = selection
        .indices
        .iter()
        .map(|&idx| (idx, enumeration.cycles[idx].len()))
        .collect();
    let view = GridView::build(enumeration, selection);
    display.print_grid(&legend, &view.render());
}

fn main() -> Result<()> {
    let cli = parse_cli();

    let base = parse_modulus(&cli.modulus)?;

    let config = match &cli.config {
        Some(path) => RunConfig::from_path(path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()))?,
        None => RunConfig::default(),
    };

    // Open the history before any output so an unusable directory fails cleanly
    let history = cli
        .log_dir
        .as_ref()
        .map(HistoryLog::new)
        .transpose()
        .context("Failed to initialize run history")?;

    let mut display = RunDisplay::new(base, cli.quiet);
    if config.is_large(base) {
        display.print_large_base_warning();
    }

    let started = Instant::now();
    let enumeration = config
        .enumerator(base)
        .run(&mut display)
        .with_context(|| format!("Failed to enumerate cycles modulo {base}"))?;
    let elapsed = started.elapsed();

    display.print_summary(enumeration.len(), elapsed);

    let selection = cli
        .grid
        .as_deref()
        .map(|input| grid_selection(&display, &enumeration, input))
        .transpose()?;

    if cli.list {
        display.print_listing(&enumeration, selection.as_ref());
    }
    if let Some(selection) = &selection {
        show_grid(&display, &enumeration, selection);
    }

    let report = CycleReport::from(&enumeration);
    match &cli.output {
        Some(path) => {
            report
                .save(path)
                .with_context(|| format!("Failed to save report to '{}'", path.display()))?;
            display.print_saved(path);
        }
        None => report.write_to(std::io::stdout().lock())?,
    }

    if let Some(history) = &history {
        history
            .append(&build_record(&enumeration, elapsed, cli.output.as_deref()))
            .context("Failed to write to run history")?;
    }

    Ok(())
}
