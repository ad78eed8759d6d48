//! Evaluate command - score one evaluation

use super::{emit, resolve_output, AppContext};
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use ecoscore::models::EvaluationRequest;
use ecoscore::reporters::{self, EvaluationReport, OutputFormat};
use ecoscore::scoring::evaluate;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct EvaluateArgs {
    /// Evaluation file (.json or .toml); conflicts with the quantity flags
    #[arg(long, short = 'i', conflicts_with_all = [
        "electricity_kwh", "gas_kg", "diesel_liters", "gasoline_liters",
        "water_liters", "waste_kg", "recycled_kg",
    ])]
    pub input: Option<PathBuf>,

    /// Monthly electricity consumption in kWh
    #[arg(long, allow_negative_numbers = true)]
    pub electricity_kwh: Option<f64>,

    /// Monthly natural gas consumption in kg
    #[arg(long, allow_negative_numbers = true)]
    pub gas_kg: Option<f64>,

    /// Monthly diesel consumption in liters
    #[arg(long, allow_negative_numbers = true)]
    pub diesel_liters: Option<f64>,

    /// Monthly gasoline consumption in liters
    #[arg(long, allow_negative_numbers = true)]
    pub gasoline_liters: Option<f64>,

    /// Monthly water consumption in liters
    #[arg(long, allow_negative_numbers = true)]
    pub water_liters: Option<f64>,

    /// Total waste generated in kg
    #[arg(long, allow_negative_numbers = true)]
    pub waste_kg: Option<f64>,

    /// Waste recycled or recovered in kg
    #[arg(long, allow_negative_numbers = true)]
    pub recycled_kg: Option<f64>,

    /// Company the evaluation belongs to
    #[arg(long)]
    pub company: Option<String>,

    /// Save the evaluation to the store (requires a company)
    #[arg(long)]
    pub save: bool,

    /// Output format: text, json, markdown (or md), html
    #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md", "html"])]
    pub format: Option<String>,

    /// Output file or directory (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Show how each score was obtained
    #[arg(long)]
    pub explain: bool,
}

impl EvaluateArgs {
    fn request_from_flags(&self) -> EvaluationRequest {
        EvaluationRequest {
            company: None,
            electricity_kwh: self.electricity_kwh,
            gas_kg: self.gas_kg,
            diesel_liters: self.diesel_liters,
            gasoline_liters: self.gasoline_liters,
            water_liters: self.water_liters,
            waste_kg: self.waste_kg,
            recycled_kg: self.recycled_kg,
        }
    }
}

/// Run the evaluate command
pub fn run(ctx: &AppContext, args: EvaluateArgs) -> Result<()> {
    let request = match &args.input {
        Some(path) => load_request(path)?,
        None => args.request_from_flags(),
    };
    let inputs = request
        .validate()
        .context("Invalid evaluation inputs")?;
    let result = evaluate(&inputs);

    let format = OutputFormat::from_str(ctx.config.format(args.format.as_deref()))?;
    let company_flag = args.company.as_deref().or(request.company.as_deref());

    let mut report = if args.save {
        let company = ctx.require_company(company_flag)?;
        let store = ctx.open_store()?;
        let saved = store.save_evaluation(&company, inputs, result)?;
        info!("Saved evaluation {} for {}", saved.id, company);
        let history = store.list_evaluations(&company)?;
        let rep_records = store.list_rep_records(&company)?;
        EvaluationReport::from_stored(&saved)
            .with_history(&history, ctx.config.report.history_limit)
            .with_rep_records(rep_records)
    } else {
        let mut report = EvaluationReport::new(inputs, result);
        report.company_id = ctx.config.company(company_flag).map(str::to_string);
        report
    };

    if args.explain {
        report = report.with_explanation();
    }

    let output = reporters::report_with_format(&report, format, ctx.color())?;
    emit(&output, resolve_output(args.output.as_deref(), format).as_deref())?;

    if let Some(id) = report.evaluation_id {
        eprintln!("{} Saved evaluation {}", style("✓").green(), style(id).cyan());
    }
    Ok(())
}

/// Read a request from a JSON or TOML file, chosen by extension
pub(crate) fn load_request(path: &Path) -> Result<EvaluationRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let request = if is_toml {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    };
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_request_from_flags() {
        let args = EvaluateArgs {
            electricity_kwh: Some(1000.0),
            waste_kg: Some(10.0),
            ..Default::default()
        };
        let request = args.request_from_flags();
        assert_eq!(request.electricity_kwh, Some(1000.0));
        assert_eq!(request.waste_kg, Some(10.0));
        assert_eq!(request.water_liters, None);
    }

    #[test]
    fn test_load_request_json_and_toml() {
        let dir = tempdir().unwrap();

        let json = dir.path().join("month.json");
        std::fs::write(
            &json,
            r#"{"companyId": "acme", "electricityKWh": 1000, "totalWasteKg": 10, "recycledWasteKg": 6}"#,
        )
        .unwrap();
        let request = load_request(&json).unwrap();
        assert_eq!(request.company.as_deref(), Some("acme"));
        assert_eq!(request.electricity_kwh, Some(1000.0));
        assert_eq!(request.recycled_kg, Some(6.0));

        let toml_path = dir.path().join("month.toml");
        std::fs::write(&toml_path, "water_liters = 25000.0\ngas_kg = 12.5\n").unwrap();
        let request = load_request(&toml_path).unwrap();
        assert_eq!(request.water_liters, Some(25_000.0));
        assert_eq!(request.gas_kg, Some(12.5));
        assert_eq!(request.company, None);
    }

    #[test]
    fn test_load_request_errors() {
        let dir = tempdir().unwrap();
        assert!(load_request(&dir.path().join("missing.json")).is_err());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(load_request(&bad).is_err());
    }
}
