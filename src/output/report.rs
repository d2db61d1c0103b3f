//! JSON report of an enumeration
//!
//! The report is the program's primary output. Its key order and shape are
//! fixed: `base`, `sequence_count`, `sequences`, `cycles_pairs`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cycle::{Enumeration, State};

/// Serializable result for one modulus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// The modulus
    pub base: u64,
    /// Number of distinct cycles; equals the length of both lists below
    pub sequence_count: usize,
    /// First-coordinate projection of each cycle
    pub sequences: Vec<Vec<u64>>,
    /// Each cycle as `[a, b]` pairs, in canonical rotation
    pub cycles_pairs: Vec<Vec<State>>,
}

impl From<&Enumeration> for CycleReport {
    fn from(enumeration: &Enumeration) -> Self {
        Self {
            base: enumeration.base,
            sequence_count: enumeration.len(),
            sequences: enumeration.sequences(),
            cycles_pairs: enumeration
                .cycles
                .iter()
                .map(|c| c.states().to_vec())
                .collect(),
        }
    }
}

impl CycleReport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize cycle report")
    }

    /// Write the report followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let json = self.to_json()?;
        writeln!(writer, "{json}").context("Failed to write cycle report")?;
        writer.flush().context("Failed to flush cycle report")?;
        Ok(())
    }

    /// Atomically write the report to `path` (write to temp, then rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
        let tmp_path = tmp_path_for(path);
        let json = self.to_json()?;
        std::fs::write(&tmp_path, format!("{json}\n"))
            .with_context(|| format!("Failed to write temp file: {}", tmp_path.display()))?;
        if let Err(err) = std::fs::rename(&tmp_path, path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err).with_context(|| {
                format!(
                    "Failed to rename {} -> {}",
                    tmp_path.display(),
                    path.display()
                )
            });
        }
        Ok(())
    }

    /// Read a report previously written by [`CycleReport::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse cycle report {}", path.display()))
    }
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::enumerate;
    use tempfile::TempDir;

    #[test]
    fn test_report_for_base_two() {
        let report = CycleReport::from(&enumerate(2).unwrap());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["base"], 2);
        assert_eq!(json["sequence_count"], 2);
        assert_eq!(json["sequences"], serde_json::json!([[0], [0, 1, 1]]));
        assert_eq!(
            json["cycles_pairs"],
            serde_json::json!([[[0, 0]], [[0, 1], [1, 1], [1, 0]]])
        );
    }

    #[test]
    fn test_key_order_is_fixed() {
        let json = CycleReport::from(&enumerate(1).unwrap()).to_json().unwrap();
        let base = json.find("\"base\"").unwrap();
        let count = json.find("\"sequence_count\"").unwrap();
        let seqs = json.find("\"sequences\"").unwrap();
        let pairs = json.find("\"cycles_pairs\"").unwrap();
        assert!(base < count && count < seqs && seqs < pairs);
    }

    #[test]
    fn test_sequences_match_pair_projection() {
        let report = CycleReport::from(&enumerate(7).unwrap());
        assert_eq!(report.sequence_count, report.sequences.len());
        assert_eq!(report.sequence_count, report.cycles_pairs.len());
        for (seq, pairs) in report.sequences.iter().zip(&report.cycles_pairs) {
            let firsts: Vec<u64> = pairs.iter().map(|s| s.first()).collect();
            assert_eq!(seq, &firsts);
        }
    }

    #[test]
    fn test_write_to_ends_with_newline() {
        let report = CycleReport::from(&enumerate(1).unwrap());
        let mut buf = Vec::new();
        report.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with('{'));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("mod5.json");
        let report = CycleReport::from(&enumerate(5).unwrap());

        report.save(&path).unwrap();

        assert!(!tmp.path().join("nested").join("mod5.json.tmp").exists());
        assert_eq!(CycleReport::load(&path).unwrap(), report);
    }

    #[test]
    fn test_save_failure_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        // renaming a file onto a non-empty directory fails
        let path = tmp.path().join("taken");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let err = CycleReport::from(&enumerate(2).unwrap())
            .save(&path)
            .unwrap_err();

        assert!(err.to_string().contains("Failed to rename"));
        assert!(!tmp.path().join("taken.tmp").exists());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        let err = CycleReport::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse cycle report"));
    }
}
