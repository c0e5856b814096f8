use crate::error::AppError;
use crate::pricing::models::{AcceleratorFees, ServiceFees, SupportFees, UnitRates};
use crate::pricing::table::{PricingTable, DEFAULT_CURRENCY};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// On-disk pricing file layout
///
/// ```toml
/// version = "2024-q3"
/// currency = "USD"
///
/// [rates]
/// core = "40"
/// memory_gb = "6.5"
/// fast_storage_gb = "0.15"
/// archive_storage_gb = "0.05"
///
/// [accelerators]
/// none = "0"
/// tier_a = "2500"
/// tier_b = "4000"
///
/// [services]
/// ml_ops = "2000"
/// data_processing = "1500"
/// monitoring = "800"
/// security = "1200"
///
/// [support]
/// basic = "0"
/// business = "1000"
/// enterprise = "5000"
/// ```
///
/// Every tier and service must be listed; unknown keys are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingTableFile {
    pub version: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub rates: UnitRates,
    pub accelerators: AcceleratorFees,
    pub services: ServiceFees,
    pub support: SupportFees,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl TryFrom<PricingTableFile> for PricingTable {
    type Error = AppError;

    fn try_from(file: PricingTableFile) -> Result<Self, Self::Error> {
        PricingTable::new(
            file.version,
            file.currency,
            file.rates,
            file.accelerators,
            file.services,
            file.support,
        )
    }
}

/// Parse a TOML pricing document
pub fn parse_pricing_toml(content: &str) -> Result<PricingTable, AppError> {
    toml::from_str(content)
        .map_err(|e| AppError::InvalidPricing(format!("Failed to parse pricing TOML: {}", e)))
}

/// Parse a JSON pricing document (same layout as the TOML form)
pub fn parse_pricing_json(json: &str) -> Result<PricingTable, AppError> {
    serde_json::from_str(json)
        .map_err(|e| AppError::InvalidPricing(format!("Failed to parse pricing JSON: {}", e)))
}

/// Load and validate a pricing file, choosing the parser by extension
pub fn load_pricing_file(path: &Path) -> Result<PricingTable, AppError> {
    info!("Loading pricing table from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes of pricing data", content.len());

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let table = if is_json {
        parse_pricing_json(&content)?
    } else {
        parse_pricing_toml(&content)?
    };

    info!(
        version = table.version(),
        currency = table.currency(),
        "Pricing table loaded"
    );
    Ok(table)
}
