//! Init command - write a project config file

use anyhow::{Context, Result};
use console::style;
use ecoscore::config::CONFIG_FILE_NAME;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Ecoscore Configuration

[storage]
# Store file (default: <data dir>/ecoscore/ecoscore.redb).
# Relative paths resolve against this directory.
# path = "data/ecoscore.redb"

[defaults]
# Default output format (text, json, markdown, html)
format = "text"

# Company used when --company is not given
# company = "acme"

# Disable colored output
no_color = false

[report]
# Number of past evaluations listed in reports
history_limit = 10
"#;

/// Run the init command
pub fn run(dir: &Path, force: bool) -> Result<()> {
    println!("\n{} Initializing Ecoscore\n", style("🌱").bold());

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        println!(
            "{} Already initialized at {} (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!(
        "  {} Score a month",
        style("ecoscore evaluate --electricity-kwh 1000 --water-liters 25000").cyan()
    );
    println!(
        "  {} Keep a history",
        style("ecoscore evaluate --input month.toml --company acme --save").cyan()
    );
    println!("  {} Review it", style("ecoscore history --company acme").cyan());

    Ok(())
}
