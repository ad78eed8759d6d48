//! REP command - extended producer responsibility registry

use super::AppContext;
use anyhow::{Context, Result};
use console::style;
use ecoscore::models::RepRecord;

/// Record one product line's generated and valorized quantities
pub fn add(
    ctx: &AppContext,
    company: Option<&str>,
    product: &str,
    subcategory: &str,
    year: i32,
    generated_kg: f64,
    valorized_kg: f64,
) -> Result<()> {
    let company = ctx.require_company(company)?;
    let record = RepRecord::new(
        &company,
        product,
        subcategory,
        year,
        generated_kg,
        valorized_kg,
    )
    .context("Invalid REP record")?;

    let store = ctx.open_store()?;
    store.add_rep_record(&record)?;

    console::set_colors_enabled(ctx.color());
    println!(
        "{} Recorded {} {} for {}: {:.1}% valorized ({})",
        style("✓").green(),
        style(&record.product).cyan(),
        record.year,
        record.company_id,
        record.valorization_percent,
        style(record.id).dim()
    );
    Ok(())
}

/// List a company's REP records ordered by year, then product
pub fn list(ctx: &AppContext, company: Option<&str>, format: Option<&str>) -> Result<()> {
    let company = ctx.require_company(company)?;
    let store = ctx.open_store()?;
    let records = store.list_rep_records(&company)?;

    if ctx.config.format(format) == "json" {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    console::set_colors_enabled(ctx.color());
    println!("\n{} {}\n", style("REP registry for").bold(), style(&company).cyan());
    if records.is_empty() {
        println!("  {} No REP records yet", style("[--]").dim());
        println!();
        return Ok(());
    }

    println!(
        "{}",
        style(format!(
            "  {:<4}  {:<20} {:<20} {:>12} {:>12} {:>8}",
            "YEAR", "PRODUCT", "SUBCATEGORY", "GENERATED", "VALORIZED", "RATE"
        ))
        .dim()
    );
    for record in &records {
        println!(
            "  {:<4}  {:<20} {:<20} {:>10.0}kg {:>10.0}kg {:>7.1}%",
            record.year,
            record.product,
            record.subcategory,
            record.quantity_generated_kg,
            record.quantity_valorized_kg,
            record.valorization_percent
        );
    }
    println!();
    Ok(())
}
