//! JSON file staging for log analytics ingestion.
//!
//! Writes the wire-form records into a staging directory as two files: an
//! array of evaluation events and a single summary event. Delivery to the
//! sink (upload, retry) is a separate concern and not handled here.

use std::fs;
use std::path::{Path, PathBuf};

use redteam_core::recorder::EvaluationRecord;
use redteam_core::summary::RunSummary;

use crate::error::Result;
use crate::schema::{EvaluationEvent, SummaryEvent};

/// File name for the staged evaluation events array.
pub const RESULTS_FILE: &str = "redteam_evaluation_results.json";

/// File name for the staged summary event.
pub const SUMMARY_FILE: &str = "redteam_evaluation_summary.json";

/// Paths of the files written by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// Path of the evaluation events file.
    pub results: PathBuf,
    /// Path of the summary event file.
    pub summary: PathBuf,
}

/// Stages wire-form records as pretty-printed JSON files.
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
}

impl Exporter {
    /// Creates an exporter targeting the given staging directory.
    ///
    /// The directory is created on export if it does not exist.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Returns the staging directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Writes evaluation events and the summary event to the staging
    /// directory, returning the written paths.
    pub fn export(&self, records: &[EvaluationRecord], summary: &RunSummary) -> Result<ExportPaths> {
        fs::create_dir_all(&self.out_dir)?;

        let events: Vec<EvaluationEvent> = records.iter().map(EvaluationEvent::from).collect();
        let results_path = self.out_dir.join(RESULTS_FILE);
        fs::write(&results_path, serde_json::to_string_pretty(&events)?)?;

        let summary_event = SummaryEvent::from(summary);
        let summary_path = self.out_dir.join(SUMMARY_FILE);
        fs::write(&summary_path, serde_json::to_string_pretty(&summary_event)?)?;

        tracing::info!(
            records = events.len(),
            dir = %self.out_dir.display(),
            "staged evaluation records for ingestion"
        );

        Ok(ExportPaths {
            results: results_path,
            summary: summary_path,
        })
    }
}
