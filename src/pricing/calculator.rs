use crate::configuration::ResourceConfiguration;
use crate::pricing::models::{CostBreakdown, CostCategory, LineItem};
use crate::pricing::table::PricingTable;
use std::sync::Arc;
use tracing::trace;

/// Compute the itemized monthly cost of a configuration.
///
/// Pure: the result depends only on the two arguments. All rates are linear,
/// with no volume discounts.
pub fn compute_breakdown(config: &ResourceConfiguration, pricing: &PricingTable) -> CostBreakdown {
    let rates = pricing.rates();

    let mut items = vec![
        LineItem::metered(CostCategory::Compute, "CPU cores", config.compute_cores, rates.core),
        LineItem::flat(
            CostCategory::Compute,
            config.accelerator.display_name(),
            pricing.accelerator_fee(config.accelerator),
        ),
        LineItem::metered(CostCategory::Compute, "Memory (GB)", config.memory_gb, rates.memory_gb),
        LineItem::metered(
            CostCategory::Storage,
            "Fast storage (GB)",
            config.fast_storage_gb,
            rates.fast_storage_gb,
        ),
        LineItem::metered(
            CostCategory::Storage,
            "Archive storage (GB)",
            config.archive_storage_gb,
            rates.archive_storage_gb,
        ),
    ];

    // BTreeSet iteration keeps service rows in a stable order
    items.extend(config.add_on_services.iter().map(|service| {
        LineItem::flat(
            CostCategory::Services,
            service.display_name(),
            pricing.service_fee(*service),
        )
    }));

    items.push(LineItem::flat(
        CostCategory::Support,
        config.support.display_name(),
        pricing.support_fee(config.support),
    ));

    let breakdown = CostBreakdown::from_line_items(items);
    trace!(total = %breakdown.total_cost(), "Computed cost breakdown");
    breakdown
}

/// Calculator bound to one pricing table
#[derive(Debug, Clone)]
pub struct CostCalculator {
    pricing: Arc<PricingTable>,
}

impl CostCalculator {
    /// Create a new cost calculator
    pub fn new(pricing: Arc<PricingTable>) -> Self {
        Self { pricing }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Calculate the breakdown for a configuration
    pub fn calculate(&self, config: &ResourceConfiguration) -> CostBreakdown {
        compute_breakdown(config, &self.pricing)
    }
}
