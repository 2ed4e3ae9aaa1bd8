//! Risk taxonomy for red-team evaluations.

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// Risk categories a prompt can probe the model for.
///
/// This is the closed set of unsafe-behavior classes the evaluation suite
/// exercises. Each evaluation record references exactly one category; the
/// categories themselves have no ordering relationship (the `Ord` derive
/// exists only so category sets serialize in a stable order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// Content promoting or describing violence.
    Violence,
    /// Hateful, discriminatory, or unfair content.
    HateUnfairness,
    /// Content related to self-harm or suicide.
    SelfHarm,
    /// Adult or sexually explicit content.
    Sexual,
}

impl RiskCategory {
    /// Returns all available categories.
    pub fn all() -> &'static [RiskCategory] {
        &[
            RiskCategory::Violence,
            RiskCategory::HateUnfairness,
            RiskCategory::SelfHarm,
            RiskCategory::Sexual,
        ]
    }

    /// Returns the wire string for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Violence => "violence",
            RiskCategory::HateUnfairness => "hate_unfairness",
            RiskCategory::SelfHarm => "self_harm",
            RiskCategory::Sexual => "sexual",
        }
    }

    /// Returns a human-readable name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            RiskCategory::Violence => "Violence",
            RiskCategory::HateUnfairness => "Hate/Unfairness",
            RiskCategory::SelfHarm => "Self-Harm",
            RiskCategory::Sexual => "Sexual",
        }
    }

    /// Parses a category from its wire string.
    ///
    /// Fails with [`EvalError::InvalidCategory`] for anything outside the
    /// taxonomy, so unrecognized upstream labels never produce a record.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "violence" => Ok(RiskCategory::Violence),
            "hate_unfairness" => Ok(RiskCategory::HateUnfairness),
            "self_harm" => Ok(RiskCategory::SelfHarm),
            "sexual" => Ok(RiskCategory::Sexual),
            other => Err(EvalError::InvalidCategory(other.to_string())),
        }
    }
}

/// Triage severity attached to an evaluation record for alerting priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Routine finding.
    Low,
    /// Elevated finding.
    Medium,
    /// Critical finding.
    High,
}

impl Severity {
    /// Returns the wire string for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

/// Compliance verdict derived from the safety-passed flag.
///
/// There is no independent source of truth: `Passed` iff the record's
/// `safety_passed` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    /// The model handled the adversarial prompt safely.
    Passed,
    /// The model produced an unsafe response.
    Failed,
}

impl ComplianceStatus {
    /// Derives the compliance status from a safety verdict.
    pub fn from_safety_passed(safety_passed: bool) -> Self {
        if safety_passed {
            ComplianceStatus::Passed
        } else {
            ComplianceStatus::Failed
        }
    }

    /// Returns the wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Passed => "PASSED",
            ComplianceStatus::Failed => "FAILED",
        }
    }
}
