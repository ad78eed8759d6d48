//! Output reporters for evaluation results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown
//! - `html` - Standalone printable HTML report

mod html;
mod json;
mod markdown;
mod text;

use crate::history::{recent_entries, HistoryEntry, HistorySummary};
use crate::models::{EvaluationInputs, EvaluationResult, RepRecord, StoredEvaluation};
use crate::scoring::{explain, recommendations, Recommendation};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;
use uuid::Uuid;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
    Html,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown, html",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

/// Everything a report shows about one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_id: Option<Uuid>,
    pub evaluated_at: DateTime<Utc>,
    pub inputs: EvaluationInputs,
    pub result: EvaluationResult,
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<HistorySummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recent: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rep_records: Vec<RepRecord>,
    /// Markdown walk-through of each score, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl EvaluationReport {
    /// Report for a fresh, unsaved evaluation
    pub fn new(inputs: EvaluationInputs, result: EvaluationResult) -> Self {
        Self {
            company_id: None,
            evaluation_id: None,
            evaluated_at: Utc::now(),
            inputs,
            recommendations: recommendations(&result.scores),
            result,
            history: None,
            recent: Vec::new(),
            rep_records: Vec::new(),
            explanation: None,
        }
    }

    /// Report for a stored evaluation
    pub fn from_stored(evaluation: &StoredEvaluation) -> Self {
        let mut report = Self::new(evaluation.inputs, evaluation.result);
        report.company_id = Some(evaluation.company_id.clone());
        report.evaluation_id = Some(evaluation.id);
        report.evaluated_at = evaluation.created_at;
        report
    }

    /// Attach the company's history (oldest first), listing up to `limit` entries
    pub fn with_history(mut self, evaluations: &[StoredEvaluation], limit: usize) -> Self {
        self.history = HistorySummary::from_evaluations(evaluations);
        self.recent = recent_entries(evaluations, limit);
        self
    }

    /// Attach the company's REP registry records
    pub fn with_rep_records(mut self, records: Vec<RepRecord>) -> Self {
        self.rep_records = records;
        self
    }

    /// Attach the step-by-step score explanation
    pub fn with_explanation(mut self) -> Self {
        self.explanation = Some(explain(&self.inputs, &self.result));
        self
    }
}

/// Render a report using an OutputFormat enum
pub fn report_with_format(
    report: &EvaluationReport,
    format: OutputFormat,
    color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report, color),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report),
        OutputFormat::Html => html::render(report),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::EvaluationRequest;
    use crate::scoring::evaluate;

    pub(crate) fn stored(company: &str, request: EvaluationRequest) -> StoredEvaluation {
        let inputs = request.validate().expect("valid request");
        StoredEvaluation::new(company, inputs, evaluate(&inputs)).expect("valid record")
    }

    /// Create a report with history and REP records for testing
    pub(crate) fn test_report() -> EvaluationReport {
        let earlier = stored(
            "acme <&> co",
            EvaluationRequest {
                gas_kg: Some(5000.0),
                diesel_liters: Some(2000.0),
                gasoline_liters: Some(1000.0),
                water_liters: Some(40_000.0),
                ..Default::default()
            },
        );
        let latest = stored(
            "acme <&> co",
            EvaluationRequest {
                electricity_kwh: Some(1000.0),
                water_liters: Some(25_000.0),
                waste_kg: Some(1000.0),
                recycled_kg: Some(600.0),
                ..Default::default()
            },
        );
        let rep = RepRecord::new("acme <&> co", "Tyres", "Passenger", 2024, 2000.0, 500.0)
            .expect("valid REP record");

        EvaluationReport::from_stored(&latest)
            .with_history(&[earlier, latest.clone()], 10)
            .with_rep_records(vec![rep])
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!(OutputFormat::from_str("html").unwrap(), OutputFormat::Html);
        assert!(OutputFormat::from_str("pdf").is_err());
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension(OutputFormat::Markdown), "md");
        assert_eq!(file_extension(OutputFormat::Html), "html");
    }

    #[test]
    fn test_report_builder() {
        let report = test_report();
        assert_eq!(report.company_id.as_deref(), Some("acme <&> co"));
        assert!(report.evaluation_id.is_some());
        assert_eq!(report.recent.len(), 2);
        assert_eq!(report.history.as_ref().map(|h| h.count), Some(2));
        // 90 / 60 / 90: only water is below its top band
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].dimension, "water");
    }

    #[test]
    fn test_every_format_renders() {
        let report = test_report();
        for format in [
            OutputFormat::Text,
            OutputFormat::Json,
            OutputFormat::Markdown,
            OutputFormat::Html,
        ] {
            let out = report_with_format(&report, format, false).expect("render report");
            assert!(out.contains("81"), "{format} output lacks the final score");
        }
    }

    #[test]
    fn test_explanation_in_every_format() {
        let report = test_report().with_explanation();
        let explanation = report.explanation.clone().expect("explanation attached");
        assert!(explanation.contains("= 81.00"));

        let json: serde_json::Value = serde_json::from_str(
            &report_with_format(&report, OutputFormat::Json, false).expect("render json"),
        )
        .expect("valid JSON");
        assert_eq!(json["explanation"].as_str(), Some(explanation.as_str()));

        for format in [OutputFormat::Text, OutputFormat::Markdown, OutputFormat::Html] {
            let out = report_with_format(&report, format, false).expect("render report");
            assert!(out.contains("= 81.00"), "{format} output lacks the explanation");
        }
    }

    #[test]
    fn test_explanation_omitted_by_default() {
        let out = report_with_format(&test_report(), OutputFormat::Json, false).expect("render");
        let json: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert!(json.get("explanation").is_none());
    }
}
