//! Run configuration
//!
//! Parses an optional `fibmod.toml` holding the advisory thresholds used
//! while enumerating. Every key has a default, so an empty file is valid.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::cycle::enumerator::{
    CycleEnumerator, DEFAULT_PROGRESS_STEPS, DEFAULT_PROGRESS_THRESHOLD,
};

/// Thresholds controlling progress reporting and warnings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
    /// Report progress when the state-space size (base²) exceeds this (default: 1000)
    #[serde(default = "default_progress_threshold")]
    pub progress_threshold: u64,
    /// Warn before computing when the base exceeds this (default: 1,000,000)
    #[serde(default = "default_large_base_warning")]
    pub large_base_warning: u64,
    /// Number of progress increments over a full run (default: 100)
    #[serde(default = "default_progress_steps")]
    pub progress_steps: u64,
}

const fn default_progress_threshold() -> u64 {
    DEFAULT_PROGRESS_THRESHOLD
}

const fn default_large_base_warning() -> u64 {
    1_000_000
}

const fn default_progress_steps() -> u64 {
    DEFAULT_PROGRESS_STEPS
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            progress_threshold: default_progress_threshold(),
            large_base_warning: default_large_base_warning(),
            progress_steps: default_progress_steps(),
        }
    }
}

impl RunConfig {
    /// Parse a config file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse config content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse fibmod.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Build an enumerator for `base` using these thresholds.
    #[must_use]
    pub const fn enumerator(&self, base: u64) -> CycleEnumerator {
        CycleEnumerator::new(base)
            .with_progress_threshold(self.progress_threshold)
            .with_progress_steps(self.progress_steps)
    }

    /// Whether `base` is large enough to deserve a warning
    #[must_use]
    pub const fn is_large(&self, base: u64) -> bool {
        base > self.large_base_warning
    }

    fn validate(&self) -> Result<()> {
        if self.progress_steps == 0 {
            bail!("progress_steps must be at least 1");
        }
        Ok(())
    }
}
