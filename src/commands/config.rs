use anyhow::Result;
use colored::Colorize;
use cost_estimator::config::Config;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration after file and environment layering
pub fn show(cfg: &Config) -> Result<()> {
    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}
