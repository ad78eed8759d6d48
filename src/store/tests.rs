use super::*;
use crate::models::{EvaluationRequest, Tier};
use crate::scoring::evaluate;
use tempfile::tempdir;

fn scored(electricity_kwh: f64, water_liters: f64) -> (EvaluationInputs, EvaluationResult) {
    let inputs = EvaluationRequest {
        electricity_kwh: Some(electricity_kwh),
        water_liters: Some(water_liters),
        waste_kg: Some(100.0),
        recycled_kg: Some(60.0),
        ..Default::default()
    }
    .validate()
    .expect("valid request");
    (inputs, evaluate(&inputs))
}

fn rep(company: &str, product: &str, year: i32) -> RepRecord {
    RepRecord::new(company, product, "general", year, 1000.0, 400.0).expect("valid REP record")
}

#[test]
fn test_save_and_get_evaluation() {
    let store = EvaluationStore::in_memory().expect("create store");
    let (inputs, result) = scored(1000.0, 25_000.0);

    let saved = store
        .save_evaluation("acme", inputs, result)
        .expect("save evaluation");
    assert_eq!(saved.company_id, "acme");

    let loaded = store
        .get_evaluation(&saved.id)
        .expect("read evaluation")
        .expect("evaluation exists");
    assert_eq!(loaded.id, saved.id);
    assert_eq!(loaded.created_at, saved.created_at);
    assert_eq!(loaded.result.scores, saved.result.scores);
    assert_eq!(loaded.result.final_score, 81.0);
    assert_eq!(loaded.result.tier, Tier::Advanced);

    assert!(store
        .get_evaluation(&Uuid::new_v4())
        .expect("read evaluation")
        .is_none());
}

#[test]
fn test_blank_company_rejected() {
    let store = EvaluationStore::in_memory().expect("create store");
    let (inputs, result) = scored(0.0, 0.0);
    assert!(store.save_evaluation("  ", inputs, result).is_err());
    assert_eq!(store.stats().expect("stats").evaluations, 0);
}

#[test]
fn test_list_filters_by_company() {
    let store = EvaluationStore::in_memory().expect("create store");
    let (inputs, result) = scored(500.0, 5_000.0);

    let first = store.save_evaluation("acme", inputs, result).expect("save");
    store.save_evaluation("globex", inputs, result).expect("save");
    let second = store.save_evaluation("acme", inputs, result).expect("save");

    let acme = store.list_evaluations("acme").expect("list");
    assert_eq!(acme.len(), 2);
    assert!(acme.iter().all(|r| r.company_id == "acme"));
    assert!(acme.iter().any(|r| r.id == first.id));
    assert!(acme.iter().any(|r| r.id == second.id));
    assert!(acme[0].created_at <= acme[1].created_at);

    assert!(store.list_evaluations("initech").expect("list").is_empty());
}

#[test]
fn test_duplicate_id_rejected() {
    let store = EvaluationStore::in_memory().expect("create store");
    let (inputs, result) = scored(0.0, 0.0);
    let record = StoredEvaluation::new("acme", inputs, result).expect("valid record");

    store
        .save_evaluations(std::slice::from_ref(&record))
        .expect("first save");
    assert!(store.save_evaluations(std::slice::from_ref(&record)).is_err());
    assert_eq!(store.stats().expect("stats").evaluations, 1);
}

#[test]
fn test_rep_records_sorted_by_year_then_product() {
    let store = EvaluationStore::in_memory().expect("create store");
    store.add_rep_record(&rep("acme", "Tyres", 2024)).expect("add");
    store.add_rep_record(&rep("acme", "Batteries", 2024)).expect("add");
    store.add_rep_record(&rep("acme", "Packaging", 2022)).expect("add");
    store.add_rep_record(&rep("globex", "Oils", 2020)).expect("add");

    let records = store.list_rep_records("acme").expect("list");
    let order: Vec<_> = records
        .iter()
        .map(|r| (r.year, r.product.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![(2022, "Packaging"), (2024, "Batteries"), (2024, "Tyres")]
    );
    assert_eq!(records[0].valorization_percent, 40.0);
}

#[test]
fn test_stats_and_company_counts() {
    let store = EvaluationStore::in_memory().expect("create store");
    let (inputs, result) = scored(0.0, 0.0);
    store.save_evaluation("globex", inputs, result).expect("save");
    store.save_evaluation("globex", inputs, result).expect("save");
    store.add_rep_record(&rep("acme", "Tyres", 2024)).expect("add");
    store.add_rep_record(&rep("globex", "Oils", 2024)).expect("add");

    assert_eq!(
        store.stats().expect("stats"),
        StoreStats {
            evaluations: 2,
            rep_records: 2
        }
    );
    assert_eq!(
        store.company_stats().expect("company stats"),
        vec![
            CompanyStats {
                company_id: "acme".to_string(),
                evaluations: 0,
                rep_records: 1,
            },
            CompanyStats {
                company_id: "globex".to_string(),
                evaluations: 2,
                rep_records: 1,
            },
        ]
    );
}

#[test]
fn test_huge_fuel_quantity_keeps_store_readable() {
    let store = EvaluationStore::in_memory().expect("create store");
    let (inputs, result) = scored(1000.0, 0.0);
    store.save_evaluation("acme", inputs, result).expect("save");

    let huge = EvaluationRequest {
        gas_kg: Some(1e308),
        ..Default::default()
    }
    .validate()
    .expect("finite quantities are valid");
    let huge_result = evaluate(&huge);
    assert!(huge_result.emissions.breakdown.gas_tons.is_finite());
    assert_eq!(huge_result.scores.carbon_score, 20);
    store
        .save_evaluation("acme", huge, huge_result)
        .expect("save huge evaluation");

    let records = store.list_evaluations("acme").expect("list");
    assert_eq!(records.len(), 2);
    assert!(records
        .iter()
        .all(|r| r.result.emissions.breakdown.gas_tons.is_finite()));
    assert_eq!(store.company_stats().expect("company stats").len(), 1);
}

#[test]
fn test_non_finite_result_rejected() {
    let store = EvaluationStore::in_memory().expect("create store");
    let (inputs, mut result) = scored(1000.0, 0.0);
    result.emissions.breakdown.gas_tons = f64::INFINITY;
    let record = StoredEvaluation::new("acme", inputs, result).expect("valid record");

    assert!(store.save_evaluations(std::slice::from_ref(&record)).is_err());
    assert_eq!(store.stats().expect("stats").evaluations, 0);
    assert!(store.list_evaluations("acme").expect("list").is_empty());
}

#[test]
fn test_persistence() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("eco.redb");
    let (inputs, result) = scored(2000.0, 12_000.0);

    let saved = {
        let store = EvaluationStore::open(&path).expect("create store");
        assert_eq!(store.path(), Some(path.as_path()));
        let saved = store
            .save_evaluation("acme", inputs, result)
            .expect("save evaluation");
        store.add_rep_record(&rep("acme", "Tyres", 2023)).expect("add");
        drop(store);
        saved
    };

    let store = EvaluationStore::open(&path).expect("reopen store");
    let records = store.list_evaluations("acme").expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, saved.id);
    assert_eq!(records[0].company_id, "acme");
    assert_eq!(records[0].result.scores, saved.result.scores);
    assert_eq!(records[0].result.final_score, saved.result.final_score);
    assert_eq!(store.list_rep_records("acme").expect("list").len(), 1);
}
