use anyhow::Result;
use colored::Colorize;
use cost_estimator::chart::format_usd;
use cost_estimator::config::Config;
use tracing::info;

/// Execute the pricing show command
///
/// Prints the active pricing table in the same TOML layout the loader reads
pub fn show(cfg: &Config) -> Result<()> {
    let table = cfg.load_pricing()?;

    let toml_string = toml::to_string_pretty(&table)?;
    println!("{}", toml_string);

    info!("Pricing table displayed successfully");
    Ok(())
}

/// Execute the pricing validate command
pub fn validate(cfg: &Config) -> Result<()> {
    println!("{}", "Validating pricing table...".yellow());

    let source = match &cfg.pricing.path {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };
    let table = cfg.load_pricing()?;

    println!("{}", "✓ Pricing table is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  {}: {}", "Source".cyan(), source);
    println!("  {}: {}", "Version".cyan(), table.version());
    println!("  {}: {}", "Currency".cyan(), table.currency());
    println!();

    for (key, price) in table.price_entries() {
        println!("    {:<32} {:>12}", key, format_usd(price));
    }

    info!(version = table.version(), "Pricing validation successful");
    Ok(())
}
