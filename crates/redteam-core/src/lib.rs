//! Redteam Core - Risk taxonomy, evaluation recording, and run summarization.
//!
//! This crate provides the in-process pipeline for AI red-team evaluation
//! runs: each adversarial prompt/response attempt becomes an immutable
//! [`EvaluationRecord`](recorder::EvaluationRecord), and a completed run of
//! records folds into a single [`RunSummary`](summary::RunSummary).
//!
//! Both stages are pure, synchronous transformations with no I/O; calling a
//! live model endpoint and shipping records to a log analytics sink belong
//! to the surrounding crates.

pub mod error;
pub mod recorder;
pub mod summary;
pub mod taxonomy;

pub use error::{EvalError, Result};
pub use recorder::{Attempt, EvaluationRecord, EvaluationRecorder, RecorderConfig, ResourceUsage};
pub use summary::{compliance_rate, summarize, RunStatus, RunSummary, SeverityCounts};
pub use taxonomy::{ComplianceStatus, RiskCategory, Severity};
