//! Report types for differential check results.
//!
//! A [`CheckReport`] can be serialized to JSON or summarized as CSV.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::check::Comparison;
use crate::corpus::CorpusEntry;
use crate::error::{Error, Result};

/// Result of checking one corpus entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EntryOutcome {
    /// Both decodes re-encoded to identical bytes.
    Passed {
        /// Entry identifier (relative path).
        entry: String,
        /// FNV-1a checksum of the source file.
        checksum: String,
        /// Comparison details.
        comparison: Comparison,
    },

    /// Decode, encode, or comparison failed for this entry.
    Failed {
        /// Entry identifier (relative path).
        entry: String,
        /// FNV-1a checksum of the source file.
        checksum: String,
        /// Rendered error.
        error: String,
    },
}

impl EntryOutcome {
    pub(crate) fn passed(id: String, entry: &CorpusEntry, comparison: Comparison) -> Self {
        Self::Passed {
            entry: id,
            checksum: entry.checksum(),
            comparison,
        }
    }

    pub(crate) fn failed(id: String, entry: &CorpusEntry, error: &Error) -> Self {
        Self::Failed {
            entry: id,
            checksum: entry.checksum(),
            error: error.to_string(),
        }
    }

    /// Entry identifier.
    #[must_use]
    pub fn entry(&self) -> &str {
        match self {
            Self::Passed { entry, .. } | Self::Failed { entry, .. } => entry,
        }
    }

    /// Whether the entry passed.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

/// Results of a full corpus check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Reference decoder identifier.
    pub reference: String,

    /// Candidate decoder identifier.
    pub candidate: String,

    /// Per-entry results in walk order.
    pub outcomes: Vec<EntryOutcome>,

    /// When this report was generated.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl CheckReport {
    /// Create an empty report.
    #[must_use]
    pub fn new(reference: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            candidate: candidate.into(),
            outcomes: Vec::new(),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Number of entries that passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_passed()).count()
    }

    /// Number of entries that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// True when no entry failed. An empty corpus counts as success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Iterate over failed entries.
    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| !o.is_passed())
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| Error::Report {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Write a one-row-per-entry CSV summary.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;

        wtr.write_record(["entry", "status", "width", "height", "encoded_len", "error"])?;

        for outcome in &self.outcomes {
            let record = match outcome {
                EntryOutcome::Passed { entry, comparison, .. } => [
                    entry.clone(),
                    "passed".to_string(),
                    comparison.width.to_string(),
                    comparison.height.to_string(),
                    comparison.encoded_len.to_string(),
                    String::new(),
                ],
                EntryOutcome::Failed { entry, error, .. } => [
                    entry.clone(),
                    "failed".to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    error.clone(),
                ],
            };
            wtr.write_record(&record)?;
        }

        wtr.flush().map_err(|source| Error::Report { path: path.to_path_buf(), source })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CheckReport {
        let entry = CorpusEntry::new("a/b.jpg", vec![1, 2, 3]);
        let mut report = CheckReport::new("jpeg-decoder", "image-jpeg");
        report.outcomes.push(EntryOutcome::passed(
            entry.id(),
            &entry,
            Comparison { width: 4, height: 2, encoded_len: 300 },
        ));
        report.outcomes.push(EntryOutcome::failed(
            "c.jpg".to_string(),
            &entry,
            &Error::Config("boom".to_string()),
        ));
        report
    }

    #[test]
    fn test_counts() {
        let report = sample_report();
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        assert_eq!(report.failures().next().unwrap().entry(), "c.jpg");
        assert!(CheckReport::new("a", "b").is_success());
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        sample_report().write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"status\": \"passed\""));
        let loaded: CheckReport = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded.outcomes.len(), 2);
        assert_eq!(loaded.reference, "jpeg-decoder");
    }

    #[test]
    fn test_unwritable_json_destination_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");

        match sample_report().write_json(&path).unwrap_err() {
            Error::Report { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        sample_report().write_csv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "entry,status,width,height,encoded_len,error");
        assert_eq!(lines[1], "a/b.jpg,passed,4,2,300,");
        assert!(lines[2].starts_with("c.jpg,failed,,,,"));
    }
}
