//! User-editable resource selection and the edits that can be applied to it.

use crate::error::AppError;
use crate::pricing::models::{AcceleratorTier, ServiceId, SupportTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Current resource selection for one estimation session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfiguration {
    pub compute_cores: u32,
    pub accelerator: AcceleratorTier,
    pub memory_gb: u32,
    pub fast_storage_gb: u32,
    pub archive_storage_gb: u32,
    pub add_on_services: BTreeSet<ServiceId>,
    pub support: SupportTier,
}

impl Default for ResourceConfiguration {
    fn default() -> Self {
        Self {
            compute_cores: 8,
            accelerator: AcceleratorTier::None,
            memory_gb: 32,
            fast_storage_gb: 500,
            archive_storage_gb: 2000,
            add_on_services: BTreeSet::new(),
            support: SupportTier::Basic,
        }
    }
}

impl ResourceConfiguration {
    /// Smallest configuration the bounds allow: every quantity at its floor
    pub fn floor(bounds: &ResourceBounds) -> Self {
        Self {
            compute_cores: bounds.compute_cores.min,
            accelerator: AcceleratorTier::None,
            memory_gb: bounds.memory_gb.min,
            fast_storage_gb: bounds.fast_storage_gb.min,
            archive_storage_gb: bounds.archive_storage_gb.min,
            add_on_services: BTreeSet::new(),
            support: SupportTier::Basic,
        }
    }

    /// Return this configuration with every quantity clamped into `bounds`
    pub fn clamped(mut self, bounds: &ResourceBounds) -> Self {
        self.compute_cores = bounds.compute_cores.clamp(self.compute_cores);
        self.memory_gb = bounds.memory_gb.clamp(self.memory_gb);
        self.fast_storage_gb = bounds.fast_storage_gb.clamp(self.fast_storage_gb);
        self.archive_storage_gb = bounds.archive_storage_gb.clamp(self.archive_storage_gb);
        self
    }

    pub fn has_service(&self, service: ServiceId) -> bool {
        self.add_on_services.contains(&service)
    }

    /// Apply one edit, clamping numeric values.
    ///
    /// Returns whether the configuration changed. Enabling a present service
    /// or disabling an absent one is a no-op.
    pub fn apply(&mut self, update: ConfigUpdate, bounds: &ResourceBounds) -> bool {
        let before = self.clone();

        match update {
            ConfigUpdate::ComputeCores(value) => {
                self.compute_cores = bounds.compute_cores.clamp(value);
            }
            ConfigUpdate::Accelerator(tier) => self.accelerator = tier,
            ConfigUpdate::MemoryGb(value) => {
                self.memory_gb = bounds.memory_gb.clamp(value);
            }
            ConfigUpdate::FastStorageGb(value) => {
                self.fast_storage_gb = bounds.fast_storage_gb.clamp(value);
            }
            ConfigUpdate::ArchiveStorageGb(value) => {
                self.archive_storage_gb = bounds.archive_storage_gb.clamp(value);
            }
            ConfigUpdate::Service { service, enabled } => {
                if enabled {
                    self.add_on_services.insert(service);
                } else {
                    self.add_on_services.remove(&service);
                }
            }
            ConfigUpdate::Support(tier) => self.support = tier,
        }

        let changed = *self != before;
        debug!(?update, changed, "Applied configuration update");
        changed
    }
}

/// A single-field edit to a [`ResourceConfiguration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ConfigUpdate {
    ComputeCores(u32),
    Accelerator(AcceleratorTier),
    MemoryGb(u32),
    FastStorageGb(u32),
    ArchiveStorageGb(u32),
    Service { service: ServiceId, enabled: bool },
    Support(SupportTier),
}

impl ConfigUpdate {
    pub fn enable(service: ServiceId) -> Self {
        Self::Service {
            service,
            enabled: true,
        }
    }

    pub fn disable(service: ServiceId) -> Self {
        Self::Service {
            service,
            enabled: false,
        }
    }
}

/// Inclusive range for one quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityBounds {
    pub min: u32,
    pub max: u32,
}

impl QuantityBounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Clamp to the nearest bound. Never panics, even on an unvalidated range.
    pub fn clamp(&self, value: u32) -> u32 {
        value.max(self.min).min(self.max)
    }
}

/// Valid ranges for every numeric configuration field
///
/// Deserialization merges over [`ResourceBounds::default`], so a config file
/// may set a single `min` or `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ResourceBoundsOverrides")]
pub struct ResourceBounds {
    pub compute_cores: QuantityBounds,
    pub memory_gb: QuantityBounds,
    pub fast_storage_gb: QuantityBounds,
    pub archive_storage_gb: QuantityBounds,
}

impl Default for ResourceBounds {
    fn default() -> Self {
        Self {
            compute_cores: QuantityBounds::new(4, 96),
            memory_gb: QuantityBounds::new(16, 512),
            fast_storage_gb: QuantityBounds::new(100, 10_000),
            archive_storage_gb: QuantityBounds::new(1_000, 50_000),
        }
    }
}

/// One range as written in a config file; either end may be omitted
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RangeOverride {
    min: Option<u32>,
    max: Option<u32>,
}

impl RangeOverride {
    fn merge(self, default: QuantityBounds) -> QuantityBounds {
        QuantityBounds {
            min: self.min.unwrap_or(default.min),
            max: self.max.unwrap_or(default.max),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ResourceBoundsOverrides {
    compute_cores: RangeOverride,
    memory_gb: RangeOverride,
    fast_storage_gb: RangeOverride,
    archive_storage_gb: RangeOverride,
}

impl From<ResourceBoundsOverrides> for ResourceBounds {
    fn from(overrides: ResourceBoundsOverrides) -> Self {
        let defaults = ResourceBounds::default();
        Self {
            compute_cores: overrides.compute_cores.merge(defaults.compute_cores),
            memory_gb: overrides.memory_gb.merge(defaults.memory_gb),
            fast_storage_gb: overrides.fast_storage_gb.merge(defaults.fast_storage_gb),
            archive_storage_gb: overrides.archive_storage_gb.merge(defaults.archive_storage_gb),
        }
    }
}

impl ResourceBounds {
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("compute_cores", self.compute_cores),
            ("memory_gb", self.memory_gb),
            ("fast_storage_gb", self.fast_storage_gb),
            ("archive_storage_gb", self.archive_storage_gb),
        ];

        for (name, range) in fields {
            if range.min > range.max {
                return Err(AppError::ConfigError(format!(
                    "bounds.{}: min ({}) is greater than max ({})",
                    name, range.min, range.max
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_within_default_bounds() {
        let bounds = ResourceBounds::default();
        let config = ResourceConfiguration::default();
        assert_eq!(config.clone().clamped(&bounds), config);
    }

    #[test]
    fn test_cores_clamped_to_bounds() {
        let bounds = ResourceBounds::default();
        let mut config = ResourceConfiguration::default();

        config.apply(ConfigUpdate::ComputeCores(0), &bounds);
        assert_eq!(config.compute_cores, 4);

        config.apply(ConfigUpdate::ComputeCores(1_000), &bounds);
        assert_eq!(config.compute_cores, 96);

        config.apply(ConfigUpdate::ComputeCores(48), &bounds);
        assert_eq!(config.compute_cores, 48);
    }

    #[test]
    fn test_storage_clamped_to_bounds() {
        let bounds = ResourceBounds::default();
        let mut config = ResourceConfiguration::default();

        config.apply(ConfigUpdate::FastStorageGb(u32::MAX), &bounds);
        config.apply(ConfigUpdate::ArchiveStorageGb(10), &bounds);
        config.apply(ConfigUpdate::MemoryGb(8), &bounds);

        assert_eq!(config.fast_storage_gb, 10_000);
        assert_eq!(config.archive_storage_gb, 1_000);
        assert_eq!(config.memory_gb, 16);
    }

    #[test]
    fn test_service_toggle_is_idempotent() {
        let bounds = ResourceBounds::default();
        let mut config = ResourceConfiguration::default();

        assert!(config.apply(ConfigUpdate::enable(ServiceId::Monitoring), &bounds));
        assert!(!config.apply(ConfigUpdate::enable(ServiceId::Monitoring), &bounds));
        assert_eq!(config.add_on_services.len(), 1);

        assert!(config.apply(ConfigUpdate::disable(ServiceId::Monitoring), &bounds));
        assert!(!config.apply(ConfigUpdate::disable(ServiceId::Monitoring), &bounds));
        assert!(!config.has_service(ServiceId::Monitoring));
    }

    #[test]
    fn test_floor_uses_minimums() {
        let bounds = ResourceBounds::default();
        let floor = ResourceConfiguration::floor(&bounds);
        assert_eq!(floor.compute_cores, 4);
        assert_eq!(floor.memory_gb, 16);
        assert_eq!(floor.fast_storage_gb, 100);
        assert_eq!(floor.archive_storage_gb, 1_000);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut bounds = ResourceBounds::default();
        bounds.memory_gb = QuantityBounds::new(64, 32);

        let err = bounds.validate().unwrap_err().to_string();
        assert!(err.contains("bounds.memory_gb"));
    }

    #[test]
    fn test_partial_bounds_keep_defaults() {
        let bounds: ResourceBounds =
            serde_json::from_str(r#"{"compute_cores": {"max": 64}, "memory_gb": {"min": 8}}"#)
                .unwrap();

        assert_eq!(bounds.compute_cores, QuantityBounds::new(4, 64));
        assert_eq!(bounds.memory_gb, QuantityBounds::new(8, 512));
        assert_eq!(bounds.fast_storage_gb, ResourceBounds::default().fast_storage_gb);
    }

    #[test]
    fn test_empty_bounds_are_defaults() {
        let bounds: ResourceBounds = serde_json::from_str("{}").unwrap();
        assert_eq!(bounds, ResourceBounds::default());
    }

    #[test]
    fn test_update_serde_shape() {
        let update: ConfigUpdate =
            serde_json::from_str(r#"{"field": "compute_cores", "value": 16}"#).unwrap();
        assert_eq!(update, ConfigUpdate::ComputeCores(16));

        let toggle: ConfigUpdate = serde_json::from_str(
            r#"{"field": "service", "value": {"service": "ml_ops", "enabled": true}}"#,
        )
        .unwrap();
        assert_eq!(toggle, ConfigUpdate::enable(ServiceId::MlOps));
    }
}
