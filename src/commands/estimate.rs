use crate::cli::EstimateArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use cost_estimator::chart::{format_monthly, format_usd, stacked_bar, BarDataset, ChartSeries};
use cost_estimator::config::Config;
use cost_estimator::{ConfigUpdate, ConfigurationStore, CostBreakdown, ResourceConfiguration};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// JSON shape of an estimate
#[derive(Debug, Serialize)]
struct EstimateReport<'a> {
    pricing_version: &'a str,
    currency: &'a str,
    configuration: &'a ResourceConfiguration,
    breakdown: &'a CostBreakdown,
    distribution: ChartSeries,
    bar: Vec<BarDataset>,
}

/// Execute the estimate command
pub fn execute(cfg: &Config, args: &EstimateArgs) -> Result<()> {
    let pricing = Arc::new(cfg.load_pricing()?);

    let mut store = if args.minimal {
        ConfigurationStore::with_configuration(
            pricing,
            cfg.bounds,
            ResourceConfiguration::floor(&cfg.bounds),
        )
    } else {
        ConfigurationStore::new(pricing, cfg.bounds)
    };

    store.update_all(args.updates());

    if let Some(path) = &args.edits {
        let edits = read_edits(path)?;
        info!("Applying {} edits from {}", edits.len(), path.display());
        store.update_all(edits);
    }

    let breakdown = store.breakdown();

    if args.json {
        let report = EstimateReport {
            pricing_version: store.pricing().version(),
            currency: store.pricing().currency(),
            configuration: store.configuration(),
            breakdown,
            distribution: ChartSeries::from_breakdown(breakdown),
            bar: stacked_bar(breakdown),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_breakdown(&store);
    }

    Ok(())
}

fn read_edits(path: &Path) -> Result<Vec<ConfigUpdate>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read edits file {}", path.display()))?;
    let edits = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse edits file {}", path.display()))?;
    Ok(edits)
}

fn print_breakdown(store: &ConfigurationStore) {
    let breakdown = store.breakdown();
    let pricing = store.pricing();

    println!(
        "{} {} ({})",
        "Cost estimate".bold(),
        format!("[pricing {}]", pricing.version()).as_str().dimmed(),
        pricing.currency()
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("CATEGORY").fg(Color::Cyan),
        Cell::new("ITEM").fg(Color::Cyan),
        Cell::new("QUANTITY").fg(Color::Cyan),
        Cell::new("UNIT PRICE").fg(Color::Cyan),
        Cell::new("MONTHLY").fg(Color::Cyan),
    ]);

    for item in breakdown.line_items() {
        table.add_row(vec![
            Cell::new(item.category.label()),
            Cell::new(&item.label),
            Cell::new(
                item.quantity
                    .map(|q| q.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            )
            .set_alignment(CellAlignment::Right),
            Cell::new(format_usd(item.unit_price)).set_alignment(CellAlignment::Right),
            Cell::new(format_usd(item.amount)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
    println!();

    // Summary
    let series = ChartSeries::from_breakdown(breakdown);
    println!("{}", "Cost Summary:".bold());
    for ((label, value), share) in series.labels.iter().zip(&series.values).zip(&series.shares) {
        let label = format!("{:<10}", format!("{}:", label));
        println!(
            "  {} {:>18}  {:>6}%",
            label.as_str().cyan(),
            format_monthly(*value),
            share
        );
    }
    let total = format!("{:>18}", format_monthly(breakdown.total_cost()));
    println!(
        "  {} {}",
        format!("{:<10}", "Total:").as_str().bold(),
        total.as_str().green().bold()
    );
}
