//! Run summarization: one aggregate rollup per evaluation run.
//!
//! [`summarize`] is a pure fold over a closed, finite record sequence.
//! It must only be called once all records for the run exist; aggregating a
//! still-growing collection would corrupt the run end timestamp and the
//! rate calculations.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};
use crate::recorder::EvaluationRecord;
use crate::taxonomy::{ComplianceStatus, RiskCategory, Severity};

/// Lifecycle status of a run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// All records for the run have been aggregated.
    Completed,
}

impl RunStatus {
    /// Returns the wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Completed => "COMPLETED",
        }
    }
}

/// Per-severity record counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

impl SeverityCounts {
    /// Increment the count for a severity.
    pub fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
        }
    }

    /// Sum of all severity counts.
    pub fn total(&self) -> u64 {
        self.low + self.medium + self.high
    }
}

/// One aggregate rollup of all evaluation records in a run.
///
/// Immutable once built. Timestamps come from the records themselves
/// rather than wall-clock capture time, so an identical summary can be
/// rebuilt from a saved record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total evaluation records in the run.
    pub total_tests: u64,
    /// Records whose compliance status is Passed.
    pub passed_tests: u64,
    /// Records whose compliance status is Failed.
    pub failed_tests: u64,
    /// Distinct risk categories that appeared in the run.
    pub risk_categories_tested: BTreeSet<RiskCategory>,
    /// Arithmetic mean of the evaluator scores.
    pub average_score: f64,
    /// Sum of tokens across all records.
    pub total_tokens_used: u64,
    /// Arithmetic mean of response latencies, in seconds.
    pub average_response_time_secs: f64,
    /// Record counts broken down by severity.
    pub severity_counts: SeverityCounts,
    /// Percentage of records that passed, in [0.0, 100.0].
    pub compliance_rate: f64,
    /// Earliest record timestamp in the run.
    pub started_at: DateTime<Utc>,
    /// Latest record timestamp in the run.
    pub completed_at: DateTime<Utc>,
    /// Summary lifecycle status.
    pub status: RunStatus,
}

/// Compliance rate as a percentage of passed records.
///
/// Fails with [`EvalError::DivisionUndefined`] when `total` is zero: a
/// rate over no records must never be silently reported as 0% or 100%.
pub fn compliance_rate(passed: u64, total: u64) -> Result<f64> {
    if total == 0 {
        return Err(EvalError::DivisionUndefined);
    }
    Ok(passed as f64 * 100.0 / total as f64)
}

/// Folds a completed run's records into a single [`RunSummary`].
///
/// Fails with [`EvalError::EmptyRun`] on an empty input; a summary over
/// zero attempts is not meaningful. Deterministic: the same record
/// sequence always yields an identical summary.
pub fn summarize(records: &[EvaluationRecord]) -> Result<RunSummary> {
    if records.is_empty() {
        return Err(EvalError::EmptyRun);
    }

    let total = records.len() as u64;
    let mut passed = 0u64;
    let mut categories = BTreeSet::new();
    let mut score_sum = 0.0;
    let mut tokens = 0u64;
    let mut latency_sum = 0.0;
    let mut severity_counts = SeverityCounts::default();
    let mut started_at = records[0].created_at;
    let mut completed_at = records[0].created_at;

    for record in records {
        if record.compliance_status == ComplianceStatus::Passed {
            passed += 1;
        }
        categories.insert(record.risk_category);
        score_sum += record.score;
        tokens += record.tokens_used;
        latency_sum += record.response_time_secs;
        severity_counts.increment(record.severity);
        started_at = started_at.min(record.created_at);
        completed_at = completed_at.max(record.created_at);
    }

    Ok(RunSummary {
        total_tests: total,
        passed_tests: passed,
        failed_tests: total - passed,
        risk_categories_tested: categories,
        average_score: score_sum / total as f64,
        total_tokens_used: tokens,
        average_response_time_secs: latency_sum / total as f64,
        severity_counts,
        compliance_rate: compliance_rate(passed, total)?,
        started_at,
        completed_at,
        status: RunStatus::Completed,
    })
}
