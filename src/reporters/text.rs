//! Text (terminal) reporter with colors and formatting

use super::EvaluationReport;
use crate::models::Tier;
use anyhow::Result;

/// ANSI codes, or empty strings when color is disabled
struct Palette {
    enabled: bool,
}

impl Palette {
    fn code(&self, code: &'static str) -> &'static str {
        if self.enabled {
            code
        } else {
            ""
        }
    }

    fn reset(&self) -> &'static str {
        self.code("\x1b[0m")
    }

    fn bold(&self) -> &'static str {
        self.code("\x1b[1m")
    }

    fn dim(&self) -> &'static str {
        self.code("\x1b[2m")
    }

    fn tier(&self, tier: Tier) -> &'static str {
        self.code(match tier {
            Tier::Advanced => "\x1b[32m",     // Green
            Tier::Intermediate => "\x1b[92m", // Light green
            Tier::Basic => "\x1b[33m",        // Yellow
            Tier::Low => "\x1b[31m",          // Red
        })
    }

    fn score(&self, score: f64) -> &'static str {
        self.code(if score >= 80.0 {
            "\x1b[32m"
        } else if score >= 60.0 {
            "\x1b[33m"
        } else {
            "\x1b[31m"
        })
    }
}

/// Render report as formatted terminal output
pub fn render(report: &EvaluationReport, color: bool) -> Result<String> {
    let p = Palette { enabled: color };
    let (bold, dim, reset) = (p.bold(), p.dim(), p.reset());
    let result = &report.result;
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{bold}Environmental Self-Assessment{reset}\n"));
    out.push_str(&format!(
        "{dim}──────────────────────────────────────{reset}\n"
    ));
    if let Some(company) = &report.company_id {
        out.push_str(&format!("Company: {}  ", company));
    }
    if let Some(id) = &report.evaluation_id {
        out.push_str(&format!("{dim}Evaluation {}{reset}", id));
    }
    if report.company_id.is_some() || report.evaluation_id.is_some() {
        out.push('\n');
    }
    out.push_str(&format!(
        "Score: {bold}{:.2}/100{reset}  Tier: {}{bold}{}{reset}\n",
        result.final_score,
        p.tier(result.tier),
        result.tier
    ));
    out.push_str(&format!("{dim}{}{reset}\n\n", result.tier.assessment()));

    // Dimension scores
    out.push_str(&format!("{bold}SCORES{reset}\n"));
    let s = &result.scores;
    out.push_str(&format!(
        "  Carbon: {}  Water: {}  Waste: {}\n\n",
        format_score(&p, s.carbon_score),
        format_score(&p, s.water_score),
        format_score(&p, s.waste_score)
    ));

    // Emissions
    let e = &result.emissions;
    out.push_str(&format!("{bold}EMISSIONS{reset} ({:.2} tCO2e)\n", e.total_tons));
    out.push_str(&format!(
        "  Scope 1: {:.2} t  {dim}(gas {:.3}, diesel {:.3}, gasoline {:.3}){reset}\n",
        e.scope1_tons, e.breakdown.gas_tons, e.breakdown.diesel_tons, e.breakdown.gasoline_tons
    ));
    out.push_str(&format!(
        "  Scope 2: {:.2} t  {dim}(electricity {:.3}){reset}\n\n",
        e.scope2_tons, e.breakdown.electricity_tons
    ));

    // Water and waste context
    out.push_str(&format!("{bold}RESOURCES{reset}\n"));
    out.push_str(&format!(
        "  Water: {:.0} L/month\n",
        report.inputs.water.monthly_consumption_liters()
    ));
    let waste = &report.inputs.waste;
    match waste.valorization_percent() {
        Some(pct) => out.push_str(&format!(
            "  Waste: {:.0} kg, {:.0} kg recycled ({:.1}%)\n\n",
            waste.total_waste_kg(),
            waste.recycled_waste_kg(),
            pct
        )),
        None => out.push_str("  Waste: none reported\n\n"),
    }

    // Recommendations
    if !report.recommendations.is_empty() {
        out.push_str(&format!("{bold}NEXT STEPS{reset}\n"));
        for hint in &report.recommendations {
            out.push_str(&format!(
                "  {dim}[{:<6}]{reset} {}\n",
                hint.dimension, hint.advice
            ));
        }
        out.push('\n');
    }

    // History
    if let Some(history) = &report.history {
        out.push_str(&format!(
            "{bold}HISTORY{reset} ({} evaluations)\n",
            history.count
        ));
        out.push_str(&format!(
            "  Average: {:.2} ({})  Best: {:.2}  Worst: {:.2}",
            history.avg_final_score,
            history.avg_tier,
            history.best_final_score,
            history.worst_final_score
        ));
        if let Some(delta) = history.last_delta {
            out.push_str(&format!("  Last change: {:+.2}", delta));
        }
        out.push('\n');
        for entry in &report.recent {
            out.push_str(&format!(
                "  {dim}{}{reset}  {}{:>6.2}{reset}  {}\n",
                entry.created_at.format("%Y-%m-%d %H:%M"),
                p.score(entry.final_score),
                entry.final_score,
                entry.tier
            ));
        }
        out.push('\n');
    }

    // REP registry
    if !report.rep_records.is_empty() {
        out.push_str(&format!("{bold}REP REGISTRY{reset}\n"));
        out.push_str(&format!(
            "{dim}  YEAR  PRODUCT              SUBCATEGORY          GENERATED   VALORIZED{reset}\n"
        ));
        for record in &report.rep_records {
            out.push_str(&format!(
                "  {:<4}  {:<20} {:<20} {:>9.0}kg  {:>8.1}%\n",
                record.year,
                truncate(&record.product, 20),
                truncate(&record.subcategory, 20),
                record.quantity_generated_kg,
                record.valorization_percent
            ));
        }
        out.push('\n');
    }

    if let Some(explanation) = &report.explanation {
        out.push_str(&format!("{bold}SCORE EXPLANATION{reset}\n"));
        out.push_str(explanation);
        out.push('\n');
    }

    Ok(out)
}

fn format_score(p: &Palette, score: u8) -> String {
    format!("{}{}{}", p.score(f64::from(score)), score, p.reset())
}

/// Truncate on char boundaries so multi-byte names never panic
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
