//! HTML reporter with embedded styles
//!
//! Generates a standalone HTML report that can be opened in any browser
//! and printed to PDF. Includes:
//! - Final score and tier badge
//! - Dimension score progress bars
//! - Emissions by scope and source
//! - History and REP registry tables when available

use super::EvaluationReport;
use crate::history::HistorySummary;
use crate::models::Tier;
use crate::scoring::{CARBON_WEIGHT, WASTE_WEIGHT, WATER_WEIGHT};
use anyhow::Result;

/// Render report as standalone HTML
pub fn render(report: &EvaluationReport) -> Result<String> {
    let mut html = String::new();

    html.push_str(&render_head(report));
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&render_header(report));
    html.push_str("<div class=\"content\">\n");

    html.push_str(&render_tier_section(report));
    html.push_str(&render_dimension_scores(report));
    html.push_str(&render_emissions(report));

    if !report.recommendations.is_empty() {
        html.push_str(&render_recommendations(report));
    }
    if let Some(history) = &report.history {
        html.push_str(&render_history(report, history));
    }
    if !report.rep_records.is_empty() {
        html.push_str(&render_rep_records(report));
    }
    if let Some(explanation) = &report.explanation {
        html.push_str(&format!(
            "<div class=\"section\">\n    <h2 class=\"section-title\">Score Explanation</h2>\n    <pre class=\"explanation\">{}</pre>\n</div>\n",
            html_escape(explanation)
        ));
    }

    html.push_str("</div>\n"); // content
    html.push_str(&render_footer());
    html.push_str("</div>\n</body>\n</html>");

    Ok(html)
}

fn render_head(report: &EvaluationReport) -> String {
    let title = match &report.company_id {
        Some(company) => format!("{} - Environmental Report", html_escape(company)),
        None => "Environmental Report".to_string(),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{CSS}
    </style>
</head>
"#
    )
}

fn render_header(report: &EvaluationReport) -> String {
    let company = report
        .company_id
        .as_deref()
        .map(|c| format!("    <p class=\"company\">{}</p>\n", html_escape(c)))
        .unwrap_or_default();
    format!(
        r#"<div class="header">
    <h1>Environmental Self-Assessment</h1>
{}    <p class="timestamp">Evaluated {}</p>
</div>
"#,
        company,
        report.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn render_tier_section(report: &EvaluationReport) -> String {
    let tier = report.result.tier;
    format!(
        r#"<div class="tier-section">
    <div class="tier-badge tier-{}">{}</div>
    <div class="score">Final Score: {:.2}/100</div>
    <p class="tier-description">{}</p>
</div>
"#,
        tier_class(tier),
        tier,
        report.result.final_score,
        tier.assessment()
    )
}

fn render_dimension_scores(report: &EvaluationReport) -> String {
    let s = &report.result.scores;
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Dimension Scores</h2>\n    <div class=\"metrics-grid\">\n",
    );
    for (name, weight, score) in [
        ("Carbon", CARBON_WEIGHT, s.carbon_score),
        ("Water", WATER_WEIGHT, s.water_score),
        ("Waste", WASTE_WEIGHT, s.waste_score),
    ] {
        html.push_str(&format!(
            r#"        <div class="metric-card">
            <h3>{} ({:.0}%)</h3>
            <div class="metric-value">{}</div>
            <div class="metric-bar">
                <div class="metric-bar-fill {}" style="width: {}%"></div>
            </div>
        </div>
"#,
            name,
            weight * 100.0,
            score,
            bar_class(score),
            score
        ));
    }
    html.push_str("    </div>\n</div>\n");
    html
}

fn render_emissions(report: &EvaluationReport) -> String {
    let e = &report.result.emissions;
    format!(
        r#"<div class="section">
    <h2 class="section-title">Emissions</h2>
    <div class="stats-grid">
        <div class="stat-item">
            <div class="stat-value">{:.2}</div>
            <div class="stat-label">Scope 1 (tCO2e)</div>
        </div>
        <div class="stat-item">
            <div class="stat-value">{:.2}</div>
            <div class="stat-label">Scope 2 (tCO2e)</div>
        </div>
        <div class="stat-item">
            <div class="stat-value">{:.2}</div>
            <div class="stat-label">Total (tCO2e)</div>
        </div>
    </div>
    <table>
        <tr><th>Source</th><th>Scope</th><th>tCO2e</th></tr>
        <tr><td>Natural gas</td><td>1</td><td>{:.3}</td></tr>
        <tr><td>Diesel</td><td>1</td><td>{:.3}</td></tr>
        <tr><td>Gasoline</td><td>1</td><td>{:.3}</td></tr>
        <tr><td>Electricity</td><td>2</td><td>{:.3}</td></tr>
    </table>
</div>
"#,
        e.scope1_tons,
        e.scope2_tons,
        e.total_tons,
        e.breakdown.gas_tons,
        e.breakdown.diesel_tons,
        e.breakdown.gasoline_tons,
        e.breakdown.electricity_tons
    )
}

fn render_recommendations(report: &EvaluationReport) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Recommendations</h2>\n    <ul class=\"recommendations\">\n",
    );
    for hint in &report.recommendations {
        html.push_str(&format!(
            "        <li><strong>{}</strong> ({}/100): {}</li>\n",
            hint.dimension, hint.score, hint.advice
        ));
    }
    html.push_str("    </ul>\n</div>\n");
    html
}

fn render_history(report: &EvaluationReport, history: &HistorySummary) -> String {
    let delta = history
        .last_delta
        .map(|d| format!(" | last change {:+.2}", d))
        .unwrap_or_default();
    let mut html = format!(
        r#"<div class="section">
    <h2 class="section-title">History</h2>
    <p>{} evaluations | average {:.2} ({}) | best {:.2} | worst {:.2}{}</p>
    <table>
        <tr><th>Date</th><th>Carbon</th><th>Water</th><th>Waste</th><th>Score</th><th>Tier</th></tr>
"#,
        history.count,
        history.avg_final_score,
        history.avg_tier,
        history.best_final_score,
        history.worst_final_score,
        delta
    );
    for entry in &report.recent {
        html.push_str(&format!(
            "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td></tr>\n",
            entry.created_at.format("%Y-%m-%d"),
            entry.scores.carbon_score,
            entry.scores.water_score,
            entry.scores.waste_score,
            entry.final_score,
            entry.tier
        ));
    }
    html.push_str("    </table>\n</div>\n");
    html
}

fn render_rep_records(report: &EvaluationReport) -> String {
    let mut html = String::from(
        r#"<div class="section">
    <h2 class="section-title">REP Registry</h2>
    <table>
        <tr><th>Year</th><th>Product</th><th>Subcategory</th><th>Generated (kg)</th><th>Valorized (kg)</th><th>Valorization</th></tr>
"#,
    );
    for record in &report.rep_records {
        html.push_str(&format!(
            "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{:.0}</td><td>{:.0}</td><td>{:.1}%</td></tr>\n",
            record.year,
            html_escape(&record.product),
            html_escape(&record.subcategory),
            record.quantity_generated_kg,
            record.quantity_valorized_kg,
            record.valorization_percent
        ));
    }
    html.push_str("    </table>\n</div>\n");
    html
}

fn render_footer() -> String {
    r#"<div class="footer">
    <p>Generated by ecoscore</p>
</div>
"#
    .to_string()
}

fn tier_class(tier: Tier) -> &'static str {
    match tier {
        Tier::Advanced => "advanced",
        Tier::Intermediate => "intermediate",
        Tier::Basic => "basic",
        Tier::Low => "low",
    }
}

fn bar_class(score: u8) -> &'static str {
    if score >= 80 {
        "bar-good"
    } else if score >= 60 {
        "bar-moderate"
    } else {
        "bar-poor"
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
:root {
    --primary-color: #15803d;
    --background-color: #f8fafc;
    --text-color: #1e293b;
    --card-background: white;
    --border-color: #e2e8f0;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1000px;
    margin: 0 auto;
    background: var(--card-background);
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #15803d 0%, #0d9488 100%);
    color: white;
    padding: 3rem 2rem;
    text-align: center;
}

.header h1 { font-size: 2.25rem; margin-bottom: 0.5rem; }
.header .company { font-size: 1.25rem; font-weight: 600; }
.header .timestamp { opacity: 0.9; font-size: 0.95rem; }

.content { padding: 2rem; }

.tier-section {
    text-align: center;
    padding: 2rem;
    background: #f1f5f9;
    border-radius: 8px;
    margin-bottom: 2rem;
}

.tier-badge {
    display: inline-block;
    font-size: 1.5rem;
    font-weight: bold;
    padding: 0.75rem 2rem;
    border-radius: 999px;
    margin-bottom: 1rem;
    color: white;
}

.tier-advanced { background: #10b981; }
.tier-intermediate { background: #22c55e; }
.tier-basic { background: #eab308; }
.tier-low { background: #ef4444; }

.score { font-size: 1.5rem; color: #64748b; margin-bottom: 0.5rem; }
.tier-description { color: #64748b; font-style: italic; }

.section { margin-bottom: 2rem; }
.section-title {
    font-size: 1.5rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}

.metrics-grid, .stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 1rem;
    margin-bottom: 1rem;
}

.metric-card, .stat-item {
    background: var(--card-background);
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1.5rem;
}

.metric-card h3 {
    font-size: 0.875rem;
    color: #64748b;
    margin-bottom: 0.5rem;
    text-transform: uppercase;
}

.metric-value, .stat-value {
    font-size: 2rem;
    font-weight: bold;
    margin-bottom: 0.5rem;
}

.stat-item { text-align: center; }
.stat-label { font-size: 0.875rem; color: #64748b; }

.metric-bar {
    height: 8px;
    background: #e2e8f0;
    border-radius: 4px;
    overflow: hidden;
}

.metric-bar-fill { height: 100%; border-radius: 4px; }
.bar-good { background: #10b981; }
.bar-moderate { background: #f59e0b; }
.bar-poor { background: #ef4444; }

table { width: 100%; border-collapse: collapse; font-size: 0.95rem; }
th, td { padding: 0.5rem 0.75rem; border-bottom: 1px solid var(--border-color); text-align: left; }
th { background: #f8fafc; color: #64748b; font-weight: 600; }

.recommendations { padding-left: 1.5rem; }
.recommendations li { margin-bottom: 0.5rem; }

.footer {
    text-align: center;
    padding: 2rem;
    color: #64748b;
    border-top: 1px solid var(--border-color);
}

@media (max-width: 768px) {
    body { padding: 1rem; }
    .header { padding: 2rem 1rem; }
    .header h1 { font-size: 1.75rem; }
}

.explanation {
    white-space: pre-wrap;
    font-size: 0.85rem;
    background: var(--background-color);
    padding: 1rem;
    border-radius: 6px;
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
    .header { -webkit-print-color-adjust: exact; print-color-adjust: exact; }
    .section { page-break-inside: avoid; }
}
"#;
