use crate::configuration::ResourceBounds;
use crate::error::AppError;
use crate::pricing::{load_pricing_file, PricingTable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub pricing: PricingConfig,
    pub bounds: ResourceBounds,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Pricing file (TOML or JSON). The built-in table is used when unset.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load the pricing table this configuration points at
    pub fn load_pricing(&self) -> Result<PricingTable, AppError> {
        match &self.pricing.path {
            Some(path) => load_pricing_file(path),
            None => {
                info!("No pricing file configured, using built-in pricing table");
                Ok(PricingTable::standard())
            }
        }
    }
}

/// Load configuration from an optional TOML file, overlaid with
/// `COST_ESTIMATOR__*` environment variables.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("COST_ESTIMATOR").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if !LOG_LEVELS.contains(&cfg.logging.level.to_ascii_lowercase().as_str()) {
        anyhow::bail!(
            "Invalid log level '{}', expected one of: {}",
            cfg.logging.level,
            LOG_LEVELS.join(", ")
        );
    }

    match cfg.logging.format.to_ascii_lowercase().as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}', expected 'text' or 'json'", other),
    }

    if let Some(path) = &cfg.pricing.path {
        if path.as_os_str().is_empty() {
            anyhow::bail!("Pricing file path cannot be empty");
        }
    }

    cfg.bounds.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::QuantityBounds;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_log_level() {
        let mut cfg = Config::default();
        cfg.logging.level = "verbose".to_string();

        let result = validate_config(&cfg);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_validate_config_rejects_log_format() {
        let mut cfg = Config::default();
        cfg.logging.format = "xml".to_string();

        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_config_rejects_inverted_bounds() {
        let mut cfg = Config::default();
        cfg.bounds.compute_cores = QuantityBounds::new(100, 10);

        let result = validate_config(&cfg);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("bounds.compute_cores"));
    }

    #[test]
    fn test_load_pricing_defaults_to_standard() {
        let cfg = Config::default();
        assert_eq!(cfg.load_pricing().unwrap(), PricingTable::standard());
    }
}
