//! Sequence selection parsing
//!
//! Turns user input such as `3-5,6,7-21` or `all` into a sorted set of
//! result indices.

use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};

/// Indices chosen from a result list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Selected indices, sorted and deduplicated
    pub indices: Vec<usize>,
    /// Entries that were well-formed but fell outside the result list
    pub skipped: Vec<String>,
}

impl Selection {
    /// Whether nothing was selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether `index` is selected
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }
}

/// Parse a selection against a result list of `count` entries.
///
/// Out-of-range entries are skipped and reported in [`Selection::skipped`];
/// malformed entries are an error.
pub fn parse_selection(input: &str, count: usize) -> Result<Selection> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("all") {
        return Ok(Selection {
            indices: (0..count).collect(),
            skipped: Vec::new(),
        });
    }

    let mut chosen = BTreeSet::new();
    let mut skipped = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if let Some((start, end)) = part.split_once('-') {
            let start = parse_index(start, part)?;
            let end = parse_index(end, part)?;
            if start > end || end >= count {
                skipped.push(part.to_string());
                continue;
            }
            chosen.extend(start..=end);
        } else {
            let idx = parse_index(part, part)?;
            if idx >= count {
                skipped.push(part.to_string());
                continue;
            }
            chosen.insert(idx);
        }
    }

    Ok(Selection {
        indices: chosen.into_iter().collect(),
        skipped,
    })
}

fn parse_index(text: &str, part: &str) -> Result<usize> {
    let text = text.trim();
    if text.is_empty() {
        bail!("Invalid selection '{part}': expected an index or a range like 3-5");
    }
    text.parse()
        .with_context(|| format!("Invalid selection '{part}': '{text}' is not an index"))
}
