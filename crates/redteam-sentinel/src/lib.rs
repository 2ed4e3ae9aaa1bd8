//! Redteam Sentinel - wire-form records for the log analytics sink.
//!
//! The field names and casing in [`schema`] are the compatibility contract
//! with the downstream sink's custom log tables; they change only in step
//! with the sink's schema. [`export`] stages the wire records as JSON files
//! for ingestion.

pub mod error;
pub mod export;
pub mod schema;

pub use error::{ExportError, Result};
pub use export::{ExportPaths, Exporter};
pub use schema::{EvaluationEvent, SummaryEvent, EVALUATION_EVENT_TYPE, SOURCE_SYSTEM, SUMMARY_EVENT_TYPE};
