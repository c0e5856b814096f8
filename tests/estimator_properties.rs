use cost_estimator::pricing::{
    compute_breakdown, AcceleratorTier, CostCategory, PricingTable, ServiceId, SupportTier,
};
use cost_estimator::{ConfigUpdate, ConfigurationStore, ResourceBounds, ResourceConfiguration};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn new_store() -> ConfigurationStore {
    ConfigurationStore::new(Arc::new(PricingTable::standard()), ResourceBounds::default())
}

/// A spread of configurations covering every tier, service subset and the
/// edges of each quantity range
fn sample_configurations() -> Vec<ResourceConfiguration> {
    let bounds = ResourceBounds::default();
    let mut configs = Vec::new();

    for (idx, accelerator) in AcceleratorTier::ALL.into_iter().enumerate() {
        for support in SupportTier::ALL {
            for mask in 0u8..16 {
                let add_on_services = ServiceId::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1u8 << *bit) != 0)
                    .map(|(_, service)| service)
                    .collect();

                let pick = |range: cost_estimator::QuantityBounds| match (mask as usize + idx) % 3 {
                    0 => range.min,
                    1 => (range.min + range.max) / 2,
                    _ => range.max,
                };

                configs.push(ResourceConfiguration {
                    compute_cores: pick(bounds.compute_cores),
                    accelerator,
                    memory_gb: pick(bounds.memory_gb),
                    fast_storage_gb: pick(bounds.fast_storage_gb),
                    archive_storage_gb: pick(bounds.archive_storage_gb),
                    add_on_services,
                    support,
                });
            }
        }
    }

    configs
}

#[test]
fn test_total_is_exact_sum_of_components() {
    let pricing = PricingTable::standard();

    for config in sample_configurations() {
        let breakdown = compute_breakdown(&config, &pricing);
        assert_eq!(
            breakdown.total_cost(),
            breakdown.compute_cost()
                + breakdown.storage_cost()
                + breakdown.services_cost()
                + breakdown.support_cost(),
            "total drifted for {:?}",
            config
        );
    }
}

#[test]
fn test_all_amounts_non_negative() {
    let pricing = PricingTable::standard();

    for config in sample_configurations() {
        let breakdown = compute_breakdown(&config, &pricing);
        for (category, value) in breakdown.components() {
            assert!(value >= Decimal::ZERO, "{:?} negative for {:?}", category, config);
        }
        assert!(breakdown.line_items().iter().all(|item| item.amount >= Decimal::ZERO));
    }
}

#[test]
fn test_line_items_sum_to_category_totals() {
    let pricing = PricingTable::standard();

    for config in sample_configurations() {
        let breakdown = compute_breakdown(&config, &pricing);
        for category in CostCategory::ALL {
            let items: Decimal = breakdown
                .line_items()
                .iter()
                .filter(|item| item.category == category)
                .map(|item| item.amount)
                .sum();
            assert_eq!(items, breakdown.category_cost(category));
        }
    }
}

#[test]
fn test_recomputation_is_deterministic() {
    let pricing = PricingTable::standard();

    for config in sample_configurations() {
        let first = compute_breakdown(&config, &pricing);
        let second = compute_breakdown(&config.clone(), &pricing.clone());

        assert_eq!(first, second);
        // Same scale as well as same value
        assert_eq!(format!("{:?}", first), format!("{:?}", second));
    }
}

#[test]
fn test_reference_scenario() {
    let config = ResourceConfiguration {
        compute_cores: 8,
        accelerator: AcceleratorTier::None,
        memory_gb: 32,
        fast_storage_gb: 500,
        archive_storage_gb: 2000,
        add_on_services: Default::default(),
        support: SupportTier::Basic,
    };

    let breakdown = compute_breakdown(&config, &PricingTable::standard());

    assert_eq!(breakdown.compute_cost(), dec!(528));
    assert_eq!(breakdown.storage_cost(), dec!(175));
    assert_eq!(breakdown.services_cost(), dec!(0));
    assert_eq!(breakdown.support_cost(), dec!(0));
    assert_eq!(breakdown.total_cost(), dec!(703));
}

#[test]
fn test_cores_clamped_at_both_ends() {
    let mut store = new_store();
    let bounds = *store.bounds();

    store.update(ConfigUpdate::ComputeCores(0));
    assert_eq!(store.configuration().compute_cores, bounds.compute_cores.min);

    store.update(ConfigUpdate::ComputeCores(u32::MAX));
    assert_eq!(store.configuration().compute_cores, bounds.compute_cores.max);
}

#[test]
fn test_service_toggle_restores_services_cost() {
    let mut store = new_store();
    store.update(ConfigUpdate::enable(ServiceId::Monitoring));

    for service in ServiceId::ALL {
        let before = store.breakdown().services_cost();
        let was_enabled = store.configuration().has_service(service);

        store.update(ConfigUpdate::enable(service));
        store.update(ConfigUpdate::disable(service));
        if was_enabled {
            store.update(ConfigUpdate::enable(service));
        }

        assert_eq!(store.breakdown().services_cost(), before, "{:?}", service);
    }
}

#[test]
fn test_all_services_add_exactly_5500() {
    let pricing = PricingTable::standard();

    for config in sample_configurations() {
        let mut without = config.clone();
        without.add_on_services.clear();
        let mut with_all = config;
        with_all.add_on_services = ServiceId::ALL.into_iter().collect();

        let base = compute_breakdown(&without, &pricing);
        let full = compute_breakdown(&with_all, &pricing);

        assert_eq!(full.services_cost() - base.services_cost(), dec!(5500));
        assert_eq!(full.total_cost() - base.total_cost(), dec!(5500));
        assert_eq!(full.compute_cost(), base.compute_cost());
        assert_eq!(full.storage_cost(), base.storage_cost());
    }
}

#[test]
fn test_monotonic_in_every_quantity() {
    let bounds = ResourceBounds::default();
    let mut store = new_store();

    let quantities: [(fn(u32) -> ConfigUpdate, CostCategory, cost_estimator::QuantityBounds); 4] = [
        (ConfigUpdate::ComputeCores, CostCategory::Compute, bounds.compute_cores),
        (ConfigUpdate::MemoryGb, CostCategory::Compute, bounds.memory_gb),
        (ConfigUpdate::FastStorageGb, CostCategory::Storage, bounds.fast_storage_gb),
        (ConfigUpdate::ArchiveStorageGb, CostCategory::Storage, bounds.archive_storage_gb),
    ];

    for (make_update, category, range) in quantities {
        store.reset();
        let step = ((range.max - range.min) / 37).max(1);
        let mut previous = store.update(make_update(range.min)).category_cost(category);

        let mut value = range.min;
        while value < range.max {
            value = (value + step).min(range.max);
            let current = store.update(make_update(value)).category_cost(category);
            assert!(current >= previous, "{:?} decreased at {}", category, value);
            previous = current;
        }
    }
}

#[test]
fn test_store_never_exposes_stale_breakdown() {
    let mut store = new_store();
    let edits = [
        ConfigUpdate::ComputeCores(32),
        ConfigUpdate::Accelerator(AcceleratorTier::TierA),
        ConfigUpdate::MemoryGb(128),
        ConfigUpdate::FastStorageGb(2_000),
        ConfigUpdate::ArchiveStorageGb(20_000),
        ConfigUpdate::enable(ServiceId::DataProcessing),
        ConfigUpdate::Support(SupportTier::Enterprise),
        ConfigUpdate::disable(ServiceId::DataProcessing),
    ];

    for edit in edits {
        store.update(edit);
        assert_eq!(
            store.breakdown(),
            &compute_breakdown(store.configuration(), store.pricing())
        );
    }
}
