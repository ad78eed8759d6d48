//! CLI command definitions and handlers

mod batch;
mod evaluate;
mod history;
mod init;
mod rep;
mod show;
mod status;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use ecoscore::config::{load_project_config, ProjectConfig};
use ecoscore::reporters::{file_extension, OutputFormat};
use ecoscore::store::EvaluationStore;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use evaluate::EvaluateArgs;

/// Ecoscore - environmental self-assessment
///
/// 100% LOCAL - evaluations are scored and stored on this machine.
#[derive(Parser, Debug)]
#[command(name = "ecoscore")]
#[command(
    version,
    about = "Environmental self-assessment: carbon, water and waste scores with a performance tier",
    long_about = "Ecoscore turns a company's monthly electricity, fuel, water and waste figures \
into carbon, water and waste scores, a weighted final score (40% carbon, 30% water, \
30% waste) and a performance tier (Low, Basic, Intermediate, Advanced).",
    after_help = "\
Examples:
  ecoscore evaluate --electricity-kwh 1000 --water-liters 25000 --waste-kg 1000 --recycled-kg 600
  ecoscore evaluate --input month.toml --company acme --save
  ecoscore batch --input year.json --format json
  ecoscore history --company acme
  ecoscore rep add --company acme --product Tyres --year 2024 --generated-kg 2000 --valorized-kg 500"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ecoscore.toml or .ecoscorerc.json in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the evaluation store
    #[arg(long, global = true, env = "ECOSCORE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an ecoscore.toml config file with example settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Score one evaluation from flags or an input file
    #[command(after_help = "\
Examples:
  ecoscore evaluate --electricity-kwh 1000 --water-liters 25000
  ecoscore evaluate --input month.json --format json
  ecoscore evaluate --input month.toml --company acme --save --format html -o acme.html
  ecoscore evaluate --gas-kg 5000 --explain")]
    Evaluate(EvaluateArgs),

    /// Score a JSON array of evaluations in parallel
    Batch {
        /// JSON file containing an array of evaluation requests
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Save every valid evaluation to the store
        #[arg(long)]
        save: bool,

        /// Company for entries that do not name one
        #[arg(long)]
        company: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Show a company's stored evaluations and averages
    History {
        /// Company to list (default: [defaults] company from config)
        #[arg(long)]
        company: Option<String>,

        /// Maximum evaluations to list (default: [report] history_limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Render the report of a stored evaluation
    Show {
        /// Evaluation id
        id: uuid::Uuid,

        /// Output format: text, json, markdown (or md), html
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md", "html"])]
        format: Option<String>,

        /// Output file or directory (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Extended producer responsibility (REP) registry
    Rep {
        #[command(subcommand)]
        action: RepAction,
    },

    /// Show store location and record counts
    Status,
}

#[derive(Subcommand, Debug)]
pub enum RepAction {
    /// Record generated and valorized quantities for a product line
    Add {
        #[arg(long)]
        company: Option<String>,

        /// Product line (e.g. Tyres, Batteries, Packaging)
        #[arg(long)]
        product: String,

        #[arg(long, default_value = "")]
        subcategory: String,

        #[arg(long, allow_negative_numbers = true)]
        year: i32,

        /// Quantity put on the market / generated, in kg
        #[arg(long)]
        generated_kg: f64,

        /// Quantity recovered or recycled, in kg
        #[arg(long)]
        valorized_kg: f64,
    },

    /// List a company's REP records by year and product
    List {
        #[arg(long)]
        company: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },
}

/// Settings shared by every command, resolved once from flags and config
pub(crate) struct AppContext {
    pub config: ProjectConfig,
    /// Directory relative config paths resolve against
    pub base_dir: PathBuf,
    data_dir: Option<PathBuf>,
    no_color: bool,
}

impl AppContext {
    fn new(cli: &Cli) -> Result<Self> {
        let base_dir = std::env::current_dir().context("Cannot read working directory")?;
        let config = load_project_config(&base_dir, cli.config.as_deref())
            .with_context(|| match &cli.config {
                Some(path) => format!("Failed to load config {}", path.display()),
                None => "Failed to load project config".to_string(),
            })?;
        let no_color = config.no_color(cli.no_color);
        Ok(Self {
            config,
            base_dir,
            data_dir: cli.data_dir.clone(),
            no_color,
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.config
            .store_path(self.data_dir.as_deref(), &self.base_dir)
    }

    /// Open the store; commands that do not persist never call this
    pub fn open_store(&self) -> Result<EvaluationStore> {
        let path = self.store_path();
        debug!("Using store {}", path.display());
        EvaluationStore::open(&path)
    }

    /// Colors only when enabled and stdout is a terminal
    pub fn color(&self) -> bool {
        !self.no_color && console::colors_enabled()
    }

    /// Company from flag or config, required
    pub fn require_company(&self, flag: Option<&str>) -> Result<String> {
        self.config
            .company(flag)
            .map(str::to_string)
            .context("No company given. Pass --company or set [defaults] company in ecoscore.toml")
    }
}

/// An output directory gets a `report.<ext>` file inside it
pub(crate) fn resolve_output(path: Option<&Path>, format: OutputFormat) -> Option<PathBuf> {
    path.map(|p| {
        if p.is_dir() {
            p.join(format!("report.{}", file_extension(format)))
        } else {
            p.to_path_buf()
        }
    })
}

/// Print rendered output, or write it to a file when a path is given
pub(crate) fn emit(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{}Report written to: {}",
                style("📄 ").bold(),
                style(path.display()).cyan()
            );
        }
        None => println!("{}", output),
    }
    Ok(())
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::new(&cli)?;

    match cli.command {
        Commands::Init { force } => init::run(&ctx.base_dir, force),
        Commands::Evaluate(args) => evaluate::run(&ctx, args),
        Commands::Batch {
            input,
            save,
            company,
            format,
        } => batch::run(&ctx, &input, save, company.as_deref(), format.as_deref()),
        Commands::History {
            company,
            limit,
            format,
        } => history::run(&ctx, company.as_deref(), limit, format.as_deref()),
        Commands::Show { id, format, output } => {
            show::run(&ctx, &id, format.as_deref(), output.as_deref())
        }
        Commands::Rep { action } => match action {
            RepAction::Add {
                company,
                product,
                subcategory,
                year,
                generated_kg,
                valorized_kg,
            } => rep::add(
                &ctx,
                company.as_deref(),
                &product,
                &subcategory,
                year,
                generated_kg,
                valorized_kg,
            ),
            RepAction::List { company, format } => {
                rep::list(&ctx, company.as_deref(), format.as_deref())
            }
        },
        Commands::Status => status::run(&ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_evaluate_flags() {
        let cli = Cli::try_parse_from([
            "ecoscore",
            "evaluate",
            "--electricity-kwh",
            "1000",
            "--recycled-kg",
            "60",
            "--no-color",
        ])
        .unwrap();
        assert!(cli.no_color);
        match cli.command {
            Commands::Evaluate(args) => {
                assert_eq!(args.electricity_kwh, Some(1000.0));
                assert_eq!(args.recycled_kg, Some(60.0));
                assert_eq!(args.gas_kg, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_input_conflicts_with_flags() {
        let parsed = Cli::try_parse_from([
            "ecoscore",
            "evaluate",
            "--input",
            "month.json",
            "--gas-kg",
            "10",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_resolve_output() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_output(Some(dir.path()), OutputFormat::Html),
            Some(dir.path().join("report.html"))
        );
        let file = dir.path().join("acme.md");
        assert_eq!(
            resolve_output(Some(&file), OutputFormat::Markdown),
            Some(file.clone())
        );
        assert_eq!(resolve_output(None, OutputFormat::Json), None);
    }

    #[test]
    fn test_parse_rep_add() {
        let cli = Cli::try_parse_from([
            "ecoscore",
            "rep",
            "add",
            "--company",
            "acme",
            "--product",
            "Tyres",
            "--year",
            "2024",
            "--generated-kg",
            "2000",
            "--valorized-kg",
            "500",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Rep {
                action: RepAction::Add { year: 2024, .. }
            }
        ));
    }
}
