use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::photostamp_core::cli::OutputFormat;
use crate::photostamp_core::error::PhotostampError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Updated,
    Failed,
    Skipped,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Updated => "updated",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of the run report: what happened to a single target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    /// 1-based, in the order records were appended.
    pub sequence: usize,
    pub outcome: Outcome,
    #[serde(serialize_with = "serialize_lossy_path")]
    pub path: PathBuf,
    pub reason: String,
    pub diagnostic: String,
}

/// Paths that are not valid UTF-8 are written with replacement characters.
fn serialize_lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Ordered, append-only collection of result records for one run.
#[derive(Debug, Default)]
pub struct Report {
    records: Vec<ResultRecord>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_updated(&mut self, path: &Path) -> &ResultRecord {
        self.push(Outcome::Updated, path, String::new(), String::new())
    }

    pub fn record_error(&mut self, path: &Path, error: &PhotostampError) -> &ResultRecord {
        self.push(
            error.outcome(),
            path,
            error.reason().to_string(),
            error.diagnostic(),
        )
    }

    fn push(
        &mut self,
        outcome: Outcome,
        path: &Path,
        reason: String,
        diagnostic: String,
    ) -> &ResultRecord {
        let sequence = self.records.len() + 1;
        self.records.push(ResultRecord {
            sequence,
            outcome,
            path: path.to_path_buf(),
            reason,
            diagnostic,
        });
        &self.records[sequence - 1]
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub fn into_records(self) -> Vec<ResultRecord> {
        self.records
    }
}

/// Outcome counts for a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let mut summary = Summary::default();
        for record in records {
            match record.outcome {
                Outcome::Updated => summary.updated += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} updated, {} skipped, {} failed",
            self.updated, self.skipped, self.failed
        )
    }
}

pub fn format_report(records: &[ResultRecord], format: &OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(records),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&format!(
                "{:>5}  {:<8} {:<60} {}\n",
                "No", "Result", "File", "Reason"
            ));
            output.push_str(&format!("{}\n", "─".repeat(100)));
            for r in records {
                output.push_str(&format!(
                    "{:>5}  {:<8} {:<60} {}\n",
                    r.sequence,
                    r.outcome.as_str(),
                    r.path.display(),
                    r.reason
                ));
                if !r.diagnostic.is_empty() {
                    output.push_str(&format!("{:>15}{}\n", "", r.diagnostic));
                }
            }
            output.push_str(&format!("\n{}", Summary::from_records(records)));
            Ok(output)
        }
    }
}
