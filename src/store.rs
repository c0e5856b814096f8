//! Configuration store: owns the current selection and keeps its breakdown
//! in step with it.

use crate::configuration::{ConfigUpdate, ResourceBounds, ResourceConfiguration};
use crate::pricing::{CostBreakdown, CostCalculator, PricingTable};
use std::sync::Arc;
use tracing::debug;

/// Holds the current [`ResourceConfiguration`] and its [`CostBreakdown`].
///
/// Every mutating call clamps, then recomputes the whole breakdown before it
/// returns. Mutation goes through `&mut self`, so no reader can observe a
/// breakdown that belongs to a previous configuration.
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    calculator: CostCalculator,
    bounds: ResourceBounds,
    config: ResourceConfiguration,
    breakdown: CostBreakdown,
}

impl ConfigurationStore {
    /// Start a session with the default configuration
    pub fn new(pricing: Arc<PricingTable>, bounds: ResourceBounds) -> Self {
        Self::with_configuration(pricing, bounds, ResourceConfiguration::default())
    }

    /// Start a session from an existing configuration (clamped into `bounds`)
    pub fn with_configuration(
        pricing: Arc<PricingTable>,
        bounds: ResourceBounds,
        config: ResourceConfiguration,
    ) -> Self {
        let calculator = CostCalculator::new(pricing);
        let config = config.clamped(&bounds);
        let breakdown = calculator.calculate(&config);

        Self {
            calculator,
            bounds,
            config,
            breakdown,
        }
    }

    pub fn configuration(&self) -> &ResourceConfiguration {
        &self.config
    }

    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }

    pub fn bounds(&self) -> &ResourceBounds {
        &self.bounds
    }

    pub fn pricing(&self) -> &PricingTable {
        self.calculator.pricing()
    }

    /// Apply one edit and return the recomputed breakdown
    pub fn update(&mut self, update: ConfigUpdate) -> &CostBreakdown {
        self.config.apply(update, &self.bounds);
        self.recompute()
    }

    /// Apply edits in order, recomputing after each one
    pub fn update_all<I>(&mut self, updates: I) -> &CostBreakdown
    where
        I: IntoIterator<Item = ConfigUpdate>,
    {
        for update in updates {
            self.update(update);
        }
        &self.breakdown
    }

    /// Replace the whole configuration
    pub fn replace(&mut self, config: ResourceConfiguration) -> &CostBreakdown {
        self.config = config.clamped(&self.bounds);
        self.recompute()
    }

    /// Return to the session-start configuration
    pub fn reset(&mut self) -> &CostBreakdown {
        self.replace(ResourceConfiguration::default())
    }

    fn recompute(&mut self) -> &CostBreakdown {
        self.breakdown = self.calculator.calculate(&self.config);
        debug!(
            compute = %self.breakdown.compute_cost(),
            storage = %self.breakdown.storage_cost(),
            services = %self.breakdown.services_cost(),
            support = %self.breakdown.support_cost(),
            total = %self.breakdown.total_cost(),
            "Recomputed cost breakdown"
        );
        &self.breakdown
    }
}
