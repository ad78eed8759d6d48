//! History command - list a company's stored evaluations

use super::AppContext;
use anyhow::Result;
use console::style;
use ecoscore::history::{recent_entries, HistorySummary};
use serde_json::json;

/// Run the history command
pub fn run(
    ctx: &AppContext,
    company: Option<&str>,
    limit: Option<usize>,
    format: Option<&str>,
) -> Result<()> {
    let company = ctx.require_company(company)?;
    let store = ctx.open_store()?;
    let evaluations = store.list_evaluations(&company)?;
    let limit = limit.unwrap_or(ctx.config.report.history_limit);

    let summary = HistorySummary::from_evaluations(&evaluations);
    let entries = recent_entries(&evaluations, limit);

    if ctx.config.format(format) == "json" {
        let out = json!({
            "company": company,
            "summary": summary,
            "evaluations": entries,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    console::set_colors_enabled(ctx.color());
    println!("\n{} {}\n", style("History for").bold(), style(&company).cyan());

    let Some(summary) = summary else {
        println!(
            "  {} No evaluations saved yet. Run {}",
            style("[--]").dim(),
            style("ecoscore evaluate --save").cyan()
        );
        println!();
        return Ok(());
    };

    println!("  Evaluations:     {}", style(summary.count).cyan());
    println!(
        "  Average score:   {:.2} ({})",
        summary.avg_final_score, summary.avg_tier
    );
    println!(
        "  Averages:        carbon {:.2}, water {:.2}, waste {:.2}",
        summary.avg_carbon_score, summary.avg_water_score, summary.avg_waste_score
    );
    println!("  Avg emissions:   {:.3} tCO2e", summary.avg_total_tons);
    println!(
        "  Best / worst:    {:.2} / {:.2}",
        summary.best_final_score, summary.worst_final_score
    );
    if let Some(delta) = summary.last_delta {
        let delta_str = format!("{:+.2}", delta);
        let styled = if delta >= 0.0 {
            style(delta_str).green()
        } else {
            style(delta_str).red()
        };
        println!("  Last change:     {}", styled);
    }

    println!();
    for entry in &entries {
        println!(
            "  {}  {}  {:>6.2}  {:<12}  {}",
            style(entry.created_at.format("%Y-%m-%d %H:%M")).dim(),
            entry.id,
            entry.final_score,
            entry.tier.to_string(),
            style(format!(
                "C{} W{} R{}",
                entry.scores.carbon_score, entry.scores.water_score, entry.scores.waste_score
            ))
            .dim()
        );
    }
    if entries.len() < summary.count {
        println!(
            "  {}",
            style(format!("... {} older evaluations", summary.count - entries.len())).dim()
        );
    }
    println!();
    Ok(())
}
