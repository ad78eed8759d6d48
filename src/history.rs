//! History aggregates across stored evaluations
//!
//! Reports show how a company's results evolve. Averages are plain
//! arithmetic means of each dimension over the selected evaluations.

use crate::models::{DimensionScores, StoredEvaluation, Tier};
use crate::scoring::{classify, round_to};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One row of a company's evaluation history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub scores: DimensionScores,
    pub total_tons: f64,
    pub final_score: f64,
    pub tier: Tier,
}

impl From<&StoredEvaluation> for HistoryEntry {
    fn from(evaluation: &StoredEvaluation) -> Self {
        Self {
            id: evaluation.id,
            created_at: evaluation.created_at,
            scores: evaluation.result.scores,
            total_tons: evaluation.result.emissions.total_tons,
            final_score: evaluation.result.final_score,
            tier: evaluation.result.tier,
        }
    }
}

/// The `limit` most recent entries, newest first
pub fn recent_entries(evaluations: &[StoredEvaluation], limit: usize) -> Vec<HistoryEntry> {
    evaluations
        .iter()
        .rev()
        .take(limit)
        .map(HistoryEntry::from)
        .collect()
}

/// Averages and trend over a company's evaluations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub count: usize,
    pub avg_carbon_score: f64,
    pub avg_water_score: f64,
    pub avg_waste_score: f64,
    /// Mean of the final scores, 2 decimals
    pub avg_final_score: f64,
    /// Tier the average final score falls in
    pub avg_tier: Tier,
    pub avg_total_tons: f64,
    pub best_final_score: f64,
    pub worst_final_score: f64,
    /// Latest final score minus the one before it
    pub last_delta: Option<f64>,
}

impl HistorySummary {
    /// Summarize evaluations given oldest first. `None` when empty.
    pub fn from_evaluations(evaluations: &[StoredEvaluation]) -> Option<Self> {
        if evaluations.is_empty() {
            return None;
        }
        let avg_final_score = round_to(mean(evaluations, |e| e.result.final_score), 2);
        let finals = evaluations.iter().map(|e| e.result.final_score);
        let best_final_score = finals.clone().fold(f64::MIN, f64::max);
        let worst_final_score = finals.fold(f64::MAX, f64::min);

        let last_delta = match evaluations {
            [.., previous, latest] => Some(round_to(
                latest.result.final_score - previous.result.final_score,
                2,
            )),
            _ => None,
        };

        Some(Self {
            count: evaluations.len(),
            avg_carbon_score: round_to(
                mean(evaluations, |e| f64::from(e.result.scores.carbon_score)),
                2,
            ),
            avg_water_score: round_to(
                mean(evaluations, |e| f64::from(e.result.scores.water_score)),
                2,
            ),
            avg_waste_score: round_to(
                mean(evaluations, |e| f64::from(e.result.scores.waste_score)),
                2,
            ),
            avg_final_score,
            avg_tier: classify(avg_final_score),
            avg_total_tons: round_to(mean(evaluations, |e| e.result.emissions.total_tons), 3),
            best_final_score,
            worst_final_score,
            last_delta,
        })
    }
}

/// Arithmetic mean of one metric; callers guarantee a non-empty slice
fn mean(evaluations: &[StoredEvaluation], metric: impl Fn(&StoredEvaluation) -> f64) -> f64 {
    evaluations.iter().map(metric).sum::<f64>() / evaluations.len() as f64
}
