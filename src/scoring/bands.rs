//! Dimension scorers
//!
//! Each dimension maps to a handful of discrete scores through ordered
//! threshold bands, checked from the worst band down.

use crate::models::{DimensionScores, EmissionsResult, WaterInput, WasteInput};
use serde::Serialize;

/// Score returned when no waste was reported
const NO_WASTE_DATA_SCORE: u8 = 30;

/// Carbon sub-score from total emissions (tCO2e)
pub fn carbon_score(emissions: &EmissionsResult) -> u8 {
    let total = emissions.total_tons;
    if total > 20.0 {
        20
    } else if total > 10.0 {
        50
    } else if total > 5.0 {
        70
    } else {
        90
    }
}

/// Water sub-score from monthly consumption (liters)
pub fn water_score(input: &WaterInput) -> u8 {
    let liters = input.monthly_consumption_liters();
    if liters > 30_000.0 {
        20
    } else if liters >= 10_000.0 {
        60
    } else {
        90
    }
}

/// Waste sub-score from the recycled share of total waste
pub fn waste_score(input: &WasteInput) -> u8 {
    let Some(percent) = input.valorization_percent() else {
        return NO_WASTE_DATA_SCORE;
    };
    if percent > 50.0 {
        90
    } else if percent >= 20.0 {
        60
    } else {
        30
    }
}

/// Improvement hint for a dimension that did not reach its top band
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub dimension: &'static str,
    pub score: u8,
    pub advice: &'static str,
}

/// Hints for every dimension below its best score, worst first.
pub fn recommendations(scores: &DimensionScores) -> Vec<Recommendation> {
    let mut hints = Vec::new();

    if scores.carbon_score < 90 {
        hints.push(Recommendation {
            dimension: "carbon",
            score: scores.carbon_score,
            advice: if scores.carbon_score <= 50 {
                "Cut fuel combustion first: fleet electrification or a gas-to-heat-pump switch moves the largest volumes"
            } else {
                "Close the remaining gap with a renewable electricity contract or targeted efficiency upgrades"
            },
        });
    }
    if scores.water_score < 90 {
        hints.push(Recommendation {
            dimension: "water",
            score: scores.water_score,
            advice: if scores.water_score <= 20 {
                "Audit the largest water uses and fix leaks; consumption is above 30,000 L per month"
            } else {
                "Install flow reducers and consider rainwater reuse to stay below 10,000 L per month"
            },
        });
    }
    if scores.waste_score < 90 {
        hints.push(Recommendation {
            dimension: "waste",
            score: scores.waste_score,
            advice: if scores.waste_score <= 30 {
                "Start tracking waste by stream and set up sorting so at least 20% is recycled"
            } else {
                "Extend sorting to more streams to recycle over half of total waste"
            },
        });
    }

    hints.sort_by_key(|h| h.score);
    hints
}
