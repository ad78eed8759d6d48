//! Evaluation pipeline
//!
//! Emissions → dimension scores → final score → tier.

use super::bands::{carbon_score, waste_score, water_score};
use super::composite::{classify, compute_final_score, CARBON_WEIGHT, WASTE_WEIGHT, WATER_WEIGHT};
use super::emissions::compute_emissions;
use crate::error::InputResult;
use crate::models::{
    DimensionScores, EvaluationInputs, EvaluationRequest, EvaluationResult,
};
use rayon::prelude::*;
use tracing::debug;

/// Score validated inputs
pub fn evaluate(inputs: &EvaluationInputs) -> EvaluationResult {
    let emissions = compute_emissions(&inputs.carbon);
    let scores = DimensionScores {
        carbon_score: carbon_score(&emissions),
        water_score: water_score(&inputs.water),
        waste_score: waste_score(&inputs.waste),
    };
    let final_score = compute_final_score(&scores);
    let tier = classify(final_score);

    debug!(
        "Evaluated: {:.3} tCO2e, carbon={}, water={}, waste={} -> {:.2} ({})",
        emissions.total_tons,
        scores.carbon_score,
        scores.water_score,
        scores.waste_score,
        final_score,
        tier
    );

    EvaluationResult {
        emissions,
        scores,
        final_score,
        tier,
    }
}

/// Validate a raw request, then score it
pub fn evaluate_request(request: &EvaluationRequest) -> InputResult<EvaluationResult> {
    let inputs = request.validate()?;
    Ok(evaluate(&inputs))
}

/// Score many requests in parallel.
///
/// Each request is validated and scored independently; the output keeps the
/// input order and carries one result per request.
pub fn evaluate_batch(
    requests: &[EvaluationRequest],
) -> Vec<InputResult<(EvaluationInputs, EvaluationResult)>> {
    requests
        .par_iter()
        .map(|request| {
            let inputs = request.validate()?;
            Ok((inputs, evaluate(&inputs)))
        })
        .collect()
}

/// Human-readable walk-through of how a result was obtained
pub fn explain(inputs: &EvaluationInputs, result: &EvaluationResult) -> String {
    let mut lines = Vec::new();
    let e = &result.emissions;
    let s = &result.scores;

    lines.push(format!(
        "# Final Score: {:.2} ({})\n",
        result.final_score, result.tier
    ));

    lines.push("## Scoring Formula\n".to_string());
    lines.push("```".to_string());
    lines.push(format!(
        "Final = Carbon × {:.2} + Water × {:.2} + Waste × {:.2}",
        CARBON_WEIGHT, WATER_WEIGHT, WASTE_WEIGHT
    ));
    lines.push("```\n".to_string());

    lines.push("## Emissions\n".to_string());
    lines.push(format!(
        "- **Scope 1**: {:.3} t (gas {:.3} + diesel {:.3} + gasoline {:.3})",
        e.scope1_tons, e.breakdown.gas_tons, e.breakdown.diesel_tons, e.breakdown.gasoline_tons
    ));
    lines.push(format!(
        "- **Scope 2**: {:.3} t (electricity {:.0} kWh)",
        e.scope2_tons,
        inputs.carbon.electricity_kwh()
    ));
    lines.push(format!("- **Total**: {:.2} tCO2e\n", e.total_tons));

    lines.push("## Dimension Scores\n".to_string());
    lines.push(format!(
        "- **Carbon**: {} ({:.2} tCO2e; bands >20 → 20, >10 → 50, >5 → 70, else 90)",
        s.carbon_score, e.total_tons
    ));
    lines.push(format!(
        "- **Water**: {} ({:.0} L/month; bands >30000 → 20, ≥10000 → 60, else 90)",
        s.water_score,
        inputs.water.monthly_consumption_liters()
    ));
    let waste_detail = match inputs.waste.valorization_percent() {
        Some(pct) => format!("{:.1}% recycled", pct),
        None => "no waste reported".to_string(),
    };
    lines.push(format!(
        "- **Waste**: {} ({}; bands >50% → 90, ≥20% → 60, else 30)\n",
        s.waste_score, waste_detail
    ));

    lines.push("## Composite\n".to_string());
    lines.push(format!(
        "- {} × {:.2} + {} × {:.2} + {} × {:.2} = {:.2}",
        s.carbon_score,
        CARBON_WEIGHT,
        s.water_score,
        WATER_WEIGHT,
        s.waste_score,
        WASTE_WEIGHT,
        result.final_score
    ));
    lines.push(format!("- Tier: **{}** ({})", result.tier, result.tier.assessment()));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::models::Tier;

    fn request() -> EvaluationRequest {
        EvaluationRequest {
            electricity_kwh: Some(1000.0),
            water_liters: Some(25_000.0),
            waste_kg: Some(1000.0),
            recycled_kg: Some(600.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_pipeline() {
        let result = evaluate_request(&request()).expect("valid request");
        assert!((result.emissions.total_tons - 0.367).abs() < 1e-9);
        assert_eq!(
            result.scores,
            DimensionScores {
                carbon_score: 90,
                water_score: 60,
                waste_score: 90
            }
        );
        assert_eq!(result.final_score, 81.0);
        assert_eq!(result.tier, Tier::Advanced);
    }

    #[test]
    fn test_heavy_emitter() {
        let request = EvaluationRequest {
            gas_kg: Some(5000.0),
            diesel_liters: Some(2000.0),
            gasoline_liters: Some(1000.0),
            water_liters: Some(45_000.0),
            waste_kg: Some(800.0),
            recycled_kg: Some(40.0),
            ..Default::default()
        };
        let result = evaluate_request(&request).expect("valid request");
        assert_eq!(result.scores.carbon_score, 20);
        assert_eq!(result.scores.water_score, 20);
        assert_eq!(result.scores.waste_score, 30);
        assert_eq!(result.final_score, 23.0);
        assert_eq!(result.tier, Tier::Low);
    }

    #[test]
    fn test_empty_request() {
        // All zeros: no emissions, low water, no waste data
        let result = evaluate_request(&EvaluationRequest::default()).expect("valid request");
        assert_eq!(result.emissions.total_tons, 0.0);
        assert_eq!(result.scores.carbon_score, 90);
        assert_eq!(result.scores.water_score, 90);
        assert_eq!(result.scores.waste_score, 30);
        assert_eq!(result.final_score, 72.0);
        assert_eq!(result.tier, Tier::Intermediate);
    }

    #[test]
    fn test_invalid_request_rejected() {
        let mut bad = request();
        bad.recycled_kg = Some(1500.0);
        assert!(matches!(
            evaluate_request(&bad),
            Err(InputError::RecycledExceedsTotal { .. })
        ));
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let mut bad = request();
        bad.gas_kg = Some(-10.0);
        let requests = vec![request(), bad, EvaluationRequest::default()];

        let results = evaluate_batch(&requests);
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().map(|(_, r)| r.tier),
            Ok(Tier::Advanced)
        );
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().map(|(_, r)| r.final_score),
            Ok(72.0)
        );
    }

    #[test]
    fn test_batch_matches_sequential() {
        let requests: Vec<_> = (0..200)
            .map(|i| EvaluationRequest {
                electricity_kwh: Some(i as f64 * 250.0),
                diesel_liters: Some(i as f64 * 20.0),
                water_liters: Some(i as f64 * 300.0),
                waste_kg: Some(100.0),
                recycled_kg: Some((i % 100) as f64),
                ..Default::default()
            })
            .collect();

        let parallel = evaluate_batch(&requests);
        for (request, outcome) in requests.iter().zip(parallel) {
            let (_, result) = outcome.expect("valid batch entry");
            assert_eq!(evaluate_request(request), Ok(result));
        }
    }

    #[test]
    fn test_explain_mentions_every_step() {
        let inputs = request().validate().expect("valid request");
        let result = evaluate(&inputs);
        let text = explain(&inputs, &result);
        assert!(text.contains("Final Score: 81.00 (Advanced)"));
        assert!(text.contains("Scope 2"));
        assert!(text.contains("60.0% recycled"));
        assert!(text.contains("90 × 0.40 + 60 × 0.30 + 90 × 0.30 = 81.00"));
    }

    #[test]
    fn test_explain_without_waste() {
        let inputs = EvaluationRequest::default()
            .validate()
            .expect("valid request");
        let text = explain(&inputs, &evaluate(&inputs));
        assert!(text.contains("no waste reported"));
    }
}
