pub mod calculator;
pub mod loader;
pub mod models;
pub mod table;

pub use calculator::{compute_breakdown, CostCalculator};
pub use loader::{load_pricing_file, parse_pricing_json, parse_pricing_toml, PricingTableFile};
pub use models::{
    AcceleratorFees, AcceleratorTier, CostBreakdown, CostCategory, LineItem, ServiceFees,
    ServiceId, SupportFees, SupportTier, UnitRates,
};
pub use table::PricingTable;
