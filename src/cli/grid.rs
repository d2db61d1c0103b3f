//! ASCII grid plot of selected cycles
//!
//! Each state `(a, b)` of a selected cycle marks the cell at `x = a`,
//! `y = b` of a `base × base` grid. Large grids are sampled so the plot
//! stays roughly 40 cells wide.

use std::collections::HashMap;
use std::fmt::Write as _;

use colored::Colorize;

use super::display::palette_color;
use super::selection::Selection;
use crate::cycle::{Enumeration, State};

/// Grids up to this size are drawn in full with axis labels
const FULL_LIMIT: u64 = 20;

/// Grids up to this size are drawn without a fill summary
const MEDIUM_LIMIT: u64 = 50;

/// Target number of sampled columns for large grids
const SAMPLE_WIDTH: u64 = 40;

/// A sampled view of the state grid, rows ordered top (`y = base-1`) down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    /// Full grid side length (the base)
    pub size: u64,
    /// Distance between sampled rows and columns
    pub step: u64,
    /// Sampled `y` coordinates, top row first
    pub ys: Vec<u64>,
    /// Sampled `x` coordinates, left to right
    pub xs: Vec<u64>,
    /// `cells[row][col]` is the result index plotted there, if any
    pub cells: Vec<Vec<Option<usize>>>,
}

impl GridView {
    /// Plot the selected cycles of `enumeration`.
    ///
    /// When two selected cycles share a state, the later index wins.
    #[must_use]
    pub fn build(enumeration: &Enumeration, selection: &Selection) -> Self {
        let size = enumeration.base;
        let step = if size <= MEDIUM_LIMIT {
            1
        } else {
            (size / SAMPLE_WIDTH).max(1)
        };

        let mut owner: HashMap<State, usize> = HashMap::new();
        for &idx in &selection.indices {
            if let Some(cycle) = enumeration.cycles.get(idx) {
                for &state in cycle.states() {
                    owner.insert(state, idx);
                }
            }
        }

        let ys: Vec<u64> = (0..size).rev().step_by(step_usize(step)).collect();
        let xs: Vec<u64> = (0..size).step_by(step_usize(step)).collect();
        let cells = ys
            .iter()
            .map(|&y| {
                xs.iter()
                    .map(|&x| owner.get(&State::new(x, y)).copied())
                    .collect()
            })
            .collect();

        Self {
            size,
            step,
            ys,
            xs,
            cells,
        }
    }

    /// Whether the grid is drawn with axis labels
    #[must_use]
    pub const fn is_labeled(&self) -> bool {
        self.size <= FULL_LIMIT
    }

    /// Whether the grid is sampled and followed by a fill summary
    #[must_use]
    pub const fn is_sampled(&self) -> bool {
        self.size > MEDIUM_LIMIT
    }

    /// Count of plotted cells and total cells in the view
    #[must_use]
    pub fn fill(&self) -> (usize, usize) {
        let total = self.cells.iter().map(Vec::len).sum();
        let filled = self.cells.iter().flatten().filter(|c| c.is_some()).count();
        (filled, total)
    }

    /// Render the grid as terminal text, two characters per cell.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.is_sampled() {
            let _ = writeln!(
                out,
                "Grid too large ({0}x{0}), showing every {1} cells:",
                self.size, self.step
            );
        }

        if self.is_labeled() {
            out.push_str("  ");
            for x in &self.xs {
                let _ = write!(out, "{x:2}");
            }
            out.push('\n');
        }

        for (row, &y) in self.cells.iter().zip(&self.ys) {
            if self.is_labeled() {
                let _ = write!(out, "{}", format!("{y:2}").bold());
            }
            for cell in row {
                match cell {
                    Some(idx) => {
                        let _ = write!(out, "{}", "██".color(palette_color(*idx)));
                    }
                    None => out.push_str("░░"),
                }
            }
            out.push('\n');
        }

        if self.is_sampled() {
            let (filled, total) = self.fill();
            #[allow(clippy::cast_precision_loss)]
            let ratio = if total == 0 {
                0.0
            } else {
                filled as f64 / total as f64 * 100.0
            };
            let _ = writeln!(out, "\nFill: {filled}/{total} ({ratio:.1}%)");
        }

        out
    }
}

fn step_usize(step: u64) -> usize {
    usize::try_from(step).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::selection::parse_selection;
    use crate::cycle::enumerate;

    #[test]
    fn test_small_grid_plots_selected_states() {
        let result = enumerate(2).unwrap();
        let sel = parse_selection("1", result.len()).unwrap();
        let view = GridView::build(&result, &sel);

        assert_eq!(view.step, 1);
        assert_eq!(view.ys, vec![1, 0]);
        assert_eq!(view.xs, vec![0, 1]);
        // top row y=1: (0,1) and (1,1) are on the 3-cycle
        assert_eq!(view.cells[0], vec![Some(1), Some(1)]);
        // bottom row y=0: (0,0) is not selected, (1,0) is
        assert_eq!(view.cells[1], vec![None, Some(1)]);
        assert_eq!(view.fill(), (3, 4));
    }

    #[test]
    fn test_all_selected_fills_every_cell() {
        let result = enumerate(6).unwrap();
        let sel = parse_selection("all", result.len()).unwrap();
        let view = GridView::build(&result, &sel);
        assert_eq!(view.fill(), (36, 36));
    }

    #[test]
    fn test_large_grid_is_sampled() {
        let result = enumerate(120).unwrap();
        let sel = parse_selection("0", result.len()).unwrap();
        let view = GridView::build(&result, &sel);

        assert!(view.is_sampled());
        assert!(!view.is_labeled());
        assert_eq!(view.step, 3);
        assert_eq!(view.xs.len(), 40);
        assert_eq!(view.ys.first(), Some(&119));
    }

    #[test]
    fn test_medium_grid_is_full_resolution_without_labels() {
        let result = enumerate(30).unwrap();
        let view = GridView::build(&result, &Selection::default());
        assert_eq!(view.step, 1);
        assert!(!view.is_labeled());
        assert!(!view.is_sampled());
        assert_eq!(view.fill(), (0, 900));
    }

    /// Remove ANSI escape sequences so assertions hold whether or not colors are on.
    fn strip_ansi(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                // skip to the final byte of the CSI sequence
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_render_shape() {
        let result = enumerate(3).unwrap();
        let sel = parse_selection("0", result.len()).unwrap();
        let text = strip_ansi(&GridView::build(&result, &sel).render());

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   0 1 2");
        assert_eq!(lines[1], " 2░░░░░░");
        assert_eq!(lines[3], " 0██░░░░");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\u{1b}[1;31m██\u{1b}[0m░░"), "██░░");
    }
}
