//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Sustainability files kept in a repository
//! - Sharing with auditors or management
//! - Pasting into wikis

use super::EvaluationReport;
use crate::history::HistorySummary;
use crate::scoring::{CARBON_WEIGHT, WASTE_WEIGHT, WATER_WEIGHT};
use anyhow::Result;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &EvaluationReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_summary(report));
    md.push('\n');

    md.push_str(&render_dimension_scores(report));
    md.push('\n');

    md.push_str(&render_emissions(report));
    md.push('\n');

    if !report.recommendations.is_empty() {
        md.push_str(&render_recommendations(report));
        md.push('\n');
    }

    if let Some(history) = &report.history {
        md.push_str(&render_history(report, history));
        md.push('\n');
    }

    if !report.rep_records.is_empty() {
        md.push_str(&render_rep_records(report));
        md.push('\n');
    }

    if let Some(explanation) = &report.explanation {
        md.push_str(explanation);
        md.push_str("\n\n");
    }

    md.push_str(&render_footer());

    Ok(md)
}

fn render_header(report: &EvaluationReport) -> String {
    let tier_emoji = match report.result.tier {
        crate::models::Tier::Advanced => "🌳",
        crate::models::Tier::Intermediate => "🌿",
        crate::models::Tier::Basic => "🌱",
        crate::models::Tier::Low => "🍂",
    };

    let company = report
        .company_id
        .as_deref()
        .map(|c| format!("**Company:** {}  \n", escape_cell(c)))
        .unwrap_or_default();

    format!(
        r#"# {} Environmental Self-Assessment

**Tier: {}** | **Score: {:.2}/100**

{}Evaluated: {}
"#,
        tier_emoji,
        report.result.tier,
        report.result.final_score,
        company,
        report.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn render_summary(report: &EvaluationReport) -> String {
    let water = report.inputs.water.monthly_consumption_liters();
    let waste = match report.inputs.waste.valorization_percent() {
        Some(pct) => format!(
            "{:.0} kg ({:.1}% recycled)",
            report.inputs.waste.total_waste_kg(),
            pct
        ),
        None => "none reported".to_string(),
    };

    format!(
        r#"## Summary

| Metric | Value |
|--------|-------|
| **Final Score** | {:.2}/100 |
| **Tier** | {} |
| **Total Emissions** | {:.2} tCO2e |
| **Water** | {:.0} L/month |
| **Waste** | {} |
| **Assessment** | {} |
"#,
        report.result.final_score,
        report.result.tier,
        report.result.emissions.total_tons,
        water,
        waste,
        report.result.tier.assessment()
    )
}

fn render_dimension_scores(report: &EvaluationReport) -> String {
    let s = &report.result.scores;
    format!(
        r#"## Dimension Scores

| Dimension | Weight | Score | Status |
|-----------|--------|-------|--------|
| Carbon | {:.0}% | {}/100 | {} |
| Water | {:.0}% | {}/100 | {} |
| Waste | {:.0}% | {}/100 | {} |
"#,
        CARBON_WEIGHT * 100.0,
        s.carbon_score,
        score_indicator(s.carbon_score),
        WATER_WEIGHT * 100.0,
        s.water_score,
        score_indicator(s.water_score),
        WASTE_WEIGHT * 100.0,
        s.waste_score,
        score_indicator(s.waste_score)
    )
}

fn render_emissions(report: &EvaluationReport) -> String {
    let e = &report.result.emissions;
    format!(
        r#"## Emissions

| Source | Scope | tCO2e |
|--------|-------|-------|
| Natural gas | 1 | {:.3} |
| Diesel | 1 | {:.3} |
| Gasoline | 1 | {:.3} |
| Electricity | 2 | {:.3} |
| **Scope 1** | | **{:.2}** |
| **Scope 2** | | **{:.2}** |
| **Total** | | **{:.2}** |
"#,
        e.breakdown.gas_tons,
        e.breakdown.diesel_tons,
        e.breakdown.gasoline_tons,
        e.breakdown.electricity_tons,
        e.scope1_tons,
        e.scope2_tons,
        e.total_tons
    )
}

fn render_recommendations(report: &EvaluationReport) -> String {
    let mut md = String::from("## Recommendations\n\n");
    for hint in &report.recommendations {
        md.push_str(&format!(
            "- **{}** ({}/100): {}\n",
            capitalize(hint.dimension),
            hint.score,
            hint.advice
        ));
    }
    md
}

fn render_history(report: &EvaluationReport, history: &HistorySummary) -> String {
    let mut md = format!(
        r#"## History

| Metric | Value |
|--------|-------|
| **Evaluations** | {} |
| **Average Score** | {:.2} ({}) |
| **Best / Worst** | {:.2} / {:.2} |
| **Average Emissions** | {:.3} tCO2e |
"#,
        history.count,
        history.avg_final_score,
        history.avg_tier,
        history.best_final_score,
        history.worst_final_score,
        history.avg_total_tons
    );
    if let Some(delta) = history.last_delta {
        md.push_str(&format!("| **Last Change** | {:+.2} |\n", delta));
    }

    if !report.recent.is_empty() {
        md.push_str("\n| Date | Carbon | Water | Waste | Score | Tier |\n");
        md.push_str("|------|--------|-------|-------|-------|------|\n");
        for entry in &report.recent {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {:.2} | {} |\n",
                entry.created_at.format("%Y-%m-%d"),
                entry.scores.carbon_score,
                entry.scores.water_score,
                entry.scores.waste_score,
                entry.final_score,
                entry.tier
            ));
        }
    }
    md
}

fn render_rep_records(report: &EvaluationReport) -> String {
    let mut md = String::from(
        "## REP Registry\n\n| Year | Product | Subcategory | Generated (kg) | Valorized (kg) | Valorization |\n|------|---------|-------------|----------------|----------------|--------------|\n",
    );
    for record in &report.rep_records {
        md.push_str(&format!(
            "| {} | {} | {} | {:.0} | {:.0} | {:.1}% |\n",
            record.year,
            escape_cell(&record.product),
            escape_cell(&record.subcategory),
            record.quantity_generated_kg,
            record.quantity_valorized_kg,
            record.valorization_percent
        ));
    }
    md
}

fn render_footer() -> String {
    "---\n\n*Generated by ecoscore*\n".to_string()
}

fn score_indicator(score: u8) -> &'static str {
    if score >= 80 {
        "✅ Good"
    } else if score >= 60 {
        "⚠️ Fair"
    } else {
        "❌ Poor"
    }
}

/// Pipes would split a table cell
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
