//! JSON reporter
//!
//! Outputs the full EvaluationReport as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use super::EvaluationReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &EvaluationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
