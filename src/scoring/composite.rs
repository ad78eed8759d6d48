//! Composite score and tier classification

use super::round_to;
use crate::models::{DimensionScores, Tier};

pub const CARBON_WEIGHT: f64 = 0.40;
pub const WATER_WEIGHT: f64 = 0.30;
pub const WASTE_WEIGHT: f64 = 0.30;

/// Weighted average of the three sub-scores, rounded to 2 decimals
pub fn compute_final_score(scores: &DimensionScores) -> f64 {
    let weighted = f64::from(scores.carbon_score) * CARBON_WEIGHT
        + f64::from(scores.water_score) * WATER_WEIGHT
        + f64::from(scores.waste_score) * WASTE_WEIGHT;
    round_to(weighted, 2)
}

/// Map a final score to its tier. Lower bounds are inclusive.
pub fn classify(final_score: f64) -> Tier {
    if final_score >= 80.0 {
        Tier::Advanced
    } else if final_score >= 60.0 {
        Tier::Intermediate
    } else if final_score >= 30.0 {
        Tier::Basic
    } else {
        Tier::Low
    }
}
