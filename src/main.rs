use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cost_estimator::{config, init_tracing};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Configuration decides the log level, so it is loaded before tracing starts
    let mut cfg = config::load_config(&args.config)?;
    if let Some(path) = &args.pricing {
        cfg.pricing.path = Some(path.clone());
    }

    init_tracing(&cfg.logging.level, cfg.logging.is_json());

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Estimate(estimate_args) => {
            commands::estimate::execute(&cfg, &estimate_args)?;
        }
        cli::Commands::Pricing { action } => match action {
            cli::PricingCommands::Show => commands::pricing::show(&cfg)?,
            cli::PricingCommands::Validate => commands::pricing::validate(&cfg)?,
        },
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
        },
        cli::Commands::Version => {
            println!("Cost Estimator v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
