//! Status command - show store location and contents

use super::AppContext;
use anyhow::Result;
use console::style;
use ecoscore::config::CONFIG_FILE_NAME;

/// Run the status command
pub fn run(ctx: &AppContext) -> Result<()> {
    console::set_colors_enabled(ctx.color());
    println!("\nEcoscore Status\n");

    let config_path = ctx.base_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!(
            "  {} Config {}",
            style("[OK]").green(),
            style(config_path.display()).cyan()
        );
    } else {
        println!(
            "  {} No {} here. Run {}",
            style("[--]").dim(),
            CONFIG_FILE_NAME,
            style("ecoscore init").cyan()
        );
    }

    let store_path = ctx.store_path();
    if !store_path.exists() {
        println!("  Store: {}", style(store_path.display()).dim());
        println!(
            "  {} No evaluations yet. Run {}",
            style("[--]").dim(),
            style("ecoscore evaluate --save").cyan()
        );
        println!();
        return Ok(());
    }

    let store = ctx.open_store()?;
    if let Some(path) = store.path() {
        println!("  Store: {}", style(path.display()).dim());
    }
    let stats = store.stats()?;
    println!(
        "  {} {} evaluations, {} REP records",
        style("[OK]").green(),
        style(stats.evaluations).cyan(),
        style(stats.rep_records).cyan()
    );

    let companies = store.company_stats()?;
    if !companies.is_empty() {
        println!();
        println!("  Companies:");
        for company in &companies {
            println!(
                "    {} ({} evaluations, {} REP records)",
                style(&company.company_id).cyan(),
                company.evaluations,
                company.rep_records
            );
        }
    }

    println!();
    Ok(())
}
