//! Environmental Scoring System
//!
//! Converts one reporting period of operational data into three dimension
//! sub-scores, a weighted final score and a performance tier.
//!
//! # Scoring Formula
//!
//! ```text
//! Scope 1 = gas_kg × 0.00296 + diesel_L × 0.00268 + gasoline_L × 0.00230
//! Scope 2 = electricity_kWh × 0.000367
//!
//! Final = Carbon × 0.40 + Water × 0.30 + Waste × 0.30   (2 decimals)
//! ```
//!
//! # Dimension Bands (evaluated high-to-low)
//!
//! - **Carbon** (total tCO2e): > 20 → 20, > 10 → 50, > 5 → 70, else 90
//! - **Water** (liters / month): > 30000 → 20, ≥ 10000 → 60, else 90
//! - **Waste** (% recycled): no waste → 30, > 50 → 90, ≥ 20 → 60, else 30
//!
//! # Tiers
//!
//! - **Advanced**: final ≥ 80
//! - **Intermediate**: final ≥ 60
//! - **Basic**: final ≥ 30
//! - **Low**: below 30
//!
//! # Example
//!
//! 1000 kWh of electricity, 25000 L of water, 600 of 1000 kg waste recycled:
//! - 0.367 t → Carbon 90
//! - Water 60, Waste 90
//!
//! Final = 36 + 18 + 27 = 81.00 → Advanced

mod bands;
mod composite;
mod emissions;
mod evaluator;

pub use bands::{carbon_score, recommendations, waste_score, water_score, Recommendation};
pub use composite::{classify, compute_final_score, CARBON_WEIGHT, WASTE_WEIGHT, WATER_WEIGHT};
pub use emissions::{
    compute_emissions, DIESEL_FACTOR, ELECTRICITY_FACTOR, GASOLINE_FACTOR, GAS_FACTOR,
};
pub use evaluator::{evaluate, evaluate_batch, evaluate_request, explain};

/// Round half away from zero to `decimals` places.
///
/// Values too large to scale are already coarser than the requested
/// precision and come back unchanged.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.36712, 3), 0.367);
        assert_eq!(round_to(81.004, 2), 81.0);
        assert_eq!(round_to(-1.256, 2), -1.26);
    }

    #[test]
    fn test_round_to_huge_values_stay_finite() {
        let huge = 1e308 * GAS_FACTOR;
        assert_eq!(round_to(huge, 3), huge);
        assert_eq!(round_to(f64::MAX, 2), f64::MAX);
    }
}
