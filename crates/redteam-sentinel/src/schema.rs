//! Wire-form record schema for the log analytics sink.
//!
//! One JSON object per record. Field names, casing, and the fixed
//! `SourceSystem`/`EventType`/`Status` strings are the contract with the
//! sink's custom log tables and must not drift independently of it.

use chrono::{DateTime, Utc};
use redteam_core::recorder::EvaluationRecord;
use redteam_core::summary::RunSummary;
use redteam_core::taxonomy::{ComplianceStatus, RiskCategory, Severity};
use redteam_core::RunStatus;
use serde::{Deserialize, Serialize};

/// `SourceSystem` value stamped on every record.
pub const SOURCE_SYSTEM: &str = "AIRedTeamEvaluation";

/// `EventType` for per-attempt evaluation records.
pub const EVALUATION_EVENT_TYPE: &str = "RedTeamEvaluation";

/// `EventType` for run summary records.
pub const SUMMARY_EVENT_TYPE: &str = "RedTeamSummary";

/// Wire form of one evaluation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EvaluationEvent {
    /// Record timestamp (the evaluation record's creation time, so the
    /// wire form is reproducible from a saved record set).
    pub time_generated: DateTime<Utc>,
    /// Always [`SOURCE_SYSTEM`].
    pub source_system: String,
    /// Always [`EVALUATION_EVENT_TYPE`].
    pub event_type: String,
    pub test_id: String,
    pub risk_category: RiskCategory,
    pub user_prompt: String,
    #[serde(rename = "AIResponse")]
    pub ai_response: String,
    pub evaluation_score: f64,
    pub safety_passed: bool,
    pub compliance_status: ComplianceStatus,
    pub severity: Severity,
    pub tokens_used: u64,
    pub response_time: f64,
}

impl From<&EvaluationRecord> for EvaluationEvent {
    fn from(record: &EvaluationRecord) -> Self {
        Self {
            time_generated: record.created_at,
            source_system: SOURCE_SYSTEM.to_string(),
            event_type: EVALUATION_EVENT_TYPE.to_string(),
            test_id: record.test_id.clone(),
            risk_category: record.risk_category,
            user_prompt: record.prompt.clone(),
            ai_response: record.response.clone(),
            evaluation_score: record.score,
            safety_passed: record.safety_passed,
            compliance_status: record.compliance_status,
            severity: record.severity,
            tokens_used: record.tokens_used,
            response_time: record.response_time_secs,
        }
    }
}

/// Wire form of one run summary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SummaryEvent {
    /// Record timestamp (the run's completion time).
    pub time_generated: DateTime<Utc>,
    /// Always [`SOURCE_SYSTEM`].
    pub source_system: String,
    /// Always [`SUMMARY_EVENT_TYPE`].
    pub event_type: String,
    pub total_tests: u64,
    pub passed_tests: u64,
    pub failed_tests: u64,
    /// Distinct categories tested, in stable (taxonomy) order.
    pub risk_categories_tested: Vec<RiskCategory>,
    pub average_score: f64,
    pub total_tokens_used: u64,
    pub average_response_time: f64,
    pub high_severity_issues: u64,
    pub medium_severity_issues: u64,
    pub low_severity_issues: u64,
    /// Percentage in [0.0, 100.0].
    pub compliance_rate: f64,
    /// Always `"COMPLETED"`.
    pub status: RunStatus,
}

impl From<&RunSummary> for SummaryEvent {
    fn from(summary: &RunSummary) -> Self {
        Self {
            time_generated: summary.completed_at,
            source_system: SOURCE_SYSTEM.to_string(),
            event_type: SUMMARY_EVENT_TYPE.to_string(),
            total_tests: summary.total_tests,
            passed_tests: summary.passed_tests,
            failed_tests: summary.failed_tests,
            risk_categories_tested: summary.risk_categories_tested.iter().copied().collect(),
            average_score: summary.average_score,
            total_tokens_used: summary.total_tokens_used,
            average_response_time: summary.average_response_time_secs,
            high_severity_issues: summary.severity_counts.high,
            medium_severity_issues: summary.severity_counts.medium,
            low_severity_issues: summary.severity_counts.low,
            compliance_rate: summary.compliance_rate,
            status: summary.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redteam_core::recorder::{Attempt, EvaluationRecorder, ResourceUsage};
    use redteam_core::summarize;

    fn sample_records() -> Vec<EvaluationRecord> {
        let mut recorder = EvaluationRecorder::new();
        [("violence", 0.95), ("self_harm", 0.6)]
            .iter()
            .map(|(category, score)| {
                recorder
                    .record(&Attempt {
                        risk_category: category.to_string(),
                        prompt: "adversarial prompt".to_string(),
                        response: "refusal".to_string(),
                        score: *score,
                        usage: ResourceUsage {
                            tokens_used: 45,
                            response_time_secs: 0.8,
                        },
                    })
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn evaluation_event_field_names_match_sink_contract() {
        let records = sample_records();
        let event = EvaluationEvent::from(&records[0]);
        let value = serde_json::to_value(&event).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "TimeGenerated",
            "SourceSystem",
            "EventType",
            "TestId",
            "RiskCategory",
            "UserPrompt",
            "AIResponse",
            "EvaluationScore",
            "SafetyPassed",
            "ComplianceStatus",
            "Severity",
            "TokensUsed",
            "ResponseTime",
        ] {
            assert!(obj.contains_key(key), "missing field {key}");
        }
        assert_eq!(obj.len(), 13);
    }

    #[test]
    fn evaluation_event_values_match_sink_contract() {
        let records = sample_records();
        let value = serde_json::to_value(EvaluationEvent::from(&records[0])).unwrap();
        assert_eq!(value["SourceSystem"], "AIRedTeamEvaluation");
        assert_eq!(value["EventType"], "RedTeamEvaluation");
        assert_eq!(value["RiskCategory"], "violence");
        assert_eq!(value["ComplianceStatus"], "PASSED");
        assert_eq!(value["Severity"], "Medium");
        assert_eq!(value["SafetyPassed"], true);
        assert_eq!(value["TestId"], "test_001");
    }

    #[test]
    fn failed_record_serializes_failed_status() {
        let records = sample_records();
        let value = serde_json::to_value(EvaluationEvent::from(&records[1])).unwrap();
        assert_eq!(value["ComplianceStatus"], "FAILED");
        assert_eq!(value["SafetyPassed"], false);
    }

    #[test]
    fn summary_event_field_names_match_sink_contract() {
        let records = sample_records();
        let summary = summarize(&records).unwrap();
        let value = serde_json::to_value(SummaryEvent::from(&summary)).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "TimeGenerated",
            "SourceSystem",
            "EventType",
            "TotalTests",
            "PassedTests",
            "FailedTests",
            "RiskCategoriesTested",
            "AverageScore",
            "TotalTokensUsed",
            "AverageResponseTime",
            "HighSeverityIssues",
            "MediumSeverityIssues",
            "LowSeverityIssues",
            "ComplianceRate",
            "Status",
        ] {
            assert!(obj.contains_key(key), "missing field {key}");
        }
        assert_eq!(obj.len(), 15);
    }

    #[test]
    fn summary_event_values_match_sink_contract() {
        let records = sample_records();
        let summary = summarize(&records).unwrap();
        let value = serde_json::to_value(SummaryEvent::from(&summary)).unwrap();
        assert_eq!(value["EventType"], "RedTeamSummary");
        assert_eq!(value["Status"], "COMPLETED");
        assert_eq!(value["TotalTests"], 2);
        assert_eq!(value["PassedTests"], 1);
        assert_eq!(value["FailedTests"], 1);
        assert_eq!(value["ComplianceRate"], 50.0);
        let categories = value["RiskCategoriesTested"].as_array().unwrap();
        assert_eq!(categories.len(), 2);
    }

    #[test]
    fn time_generated_comes_from_record_not_wall_clock() {
        let records = sample_records();
        let event = EvaluationEvent::from(&records[0]);
        assert_eq!(event.time_generated, records[0].created_at);

        let summary = summarize(&records).unwrap();
        let summary_event = SummaryEvent::from(&summary);
        assert_eq!(summary_event.time_generated, summary.completed_at);
    }
}
