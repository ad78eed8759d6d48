//! Batch command - score many evaluations from one file

use super::AppContext;
use anyhow::{Context, Result};
use console::style;
use ecoscore::models::{EvaluationRequest, StoredEvaluation};
use ecoscore::scoring::evaluate_batch;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// One line of batch output
#[derive(Debug, Serialize)]
struct BatchEntry {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<uuid::Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ecoscore::models::EvaluationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the batch command
pub fn run(
    ctx: &AppContext,
    input: &Path,
    save: bool,
    company: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let requests: Vec<EvaluationRequest> = serde_json::from_str(&content)
        .with_context(|| format!("{} must hold a JSON array of evaluations", input.display()))?;
    info!("Scoring {} evaluations from {}", requests.len(), input.display());

    let outcomes = evaluate_batch(&requests);

    let mut entries = Vec::with_capacity(outcomes.len());
    let mut to_save = Vec::new();
    for (index, (request, outcome)) in requests.iter().zip(outcomes).enumerate() {
        // Entry's own company > --company > config default
        let entry_company = ctx
            .config
            .company(request.company.as_deref().or(company))
            .map(str::to_string);

        let mut entry = BatchEntry {
            index,
            company: entry_company.clone(),
            id: None,
            result: None,
            error: None,
        };
        match outcome {
            Ok((inputs, result)) => {
                entry.result = Some(result);
                if save {
                    let company = entry_company.as_deref().with_context(|| {
                        format!("Entry {} has no company; pass --company to save", index)
                    })?;
                    let record = StoredEvaluation::new(company, inputs, result)?;
                    entry.id = Some(record.id);
                    to_save.push(record);
                }
            }
            Err(e) => {
                warn!("Entry {} rejected: {}", index, e);
                entry.error = Some(e.to_string());
            }
        }
        entries.push(entry);
    }

    if save && !to_save.is_empty() {
        let store = ctx.open_store()?;
        store.save_evaluations(&to_save)?;
        info!("Saved {} evaluations", to_save.len());
    }

    match ctx.config.format(format) {
        "json" => println!("{}", serde_json::to_string_pretty(&entries)?),
        _ => print_table(&entries, ctx.color()),
    }

    let rejected = entries.iter().filter(|e| e.error.is_some()).count();
    if rejected > 0 {
        anyhow::bail!("{} of {} evaluations were rejected", rejected, entries.len());
    }
    Ok(())
}

fn print_table(entries: &[BatchEntry], color: bool) {
    console::set_colors_enabled(color);
    println!(
        "{}",
        style(format!(
            "{:>4}  {:<20} {:>6} {:>6} {:>6} {:>8}  {}",
            "#", "COMPANY", "CARBON", "WATER", "WASTE", "SCORE", "TIER"
        ))
        .bold()
    );
    for entry in entries {
        let company = entry.company.as_deref().unwrap_or("-");
        match (&entry.result, &entry.error) {
            (Some(result), _) => println!(
                "{:>4}  {:<20} {:>6} {:>6} {:>6} {:>8.2}  {}",
                entry.index,
                company,
                result.scores.carbon_score,
                result.scores.water_score,
                result.scores.waste_score,
                result.final_score,
                result.tier
            ),
            (None, Some(error)) => println!(
                "{:>4}  {:<20} {}",
                entry.index,
                company,
                style(format!("rejected: {}", error)).red()
            ),
            (None, None) => {}
        }
    }
}
