//! Evaluation pipeline error types.

use thiserror::Error;

/// Errors that can occur while recording or summarizing evaluations.
///
/// All of these are local, synchronous failures raised at the point of
/// record or summary construction. Nothing is retried and nothing is
/// swallowed; callers decide whether to skip a malformed attempt or abort
/// the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The attempt referenced a risk category outside the taxonomy.
    #[error("unrecognized risk category: {0:?}")]
    InvalidCategory(String),

    /// The evaluator supplied a safety score outside [0.0, 1.0].
    ///
    /// Out-of-range scores are never clamped; they indicate an upstream
    /// evaluator defect and must surface as an error.
    #[error("evaluation score {0} outside [0.0, 1.0]")]
    ScoreOutOfRange(f64),

    /// Summarization was attempted over zero records.
    #[error("cannot summarize a run with no evaluation records")]
    EmptyRun,

    /// A compliance rate was requested for an empty record set.
    #[error("compliance rate undefined over zero records")]
    DivisionUndefined,
}

/// Result type for evaluation pipeline operations.
pub type Result<T> = std::result::Result<T, EvalError>;
