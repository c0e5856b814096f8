pub mod chart;
pub mod config;
pub mod configuration;
pub mod error;
pub mod pricing;
pub mod store;

pub use configuration::{ConfigUpdate, QuantityBounds, ResourceBounds, ResourceConfiguration};
pub use error::AppError;
pub use pricing::{compute_breakdown, CostBreakdown, PricingTable};
pub use store::ConfigurationStore;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over `default_level`. Output goes to stderr so
/// it never mixes with JSON written to stdout.
pub fn init_tracing(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
