use crate::error::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accelerator (GPU) tier attached to the compute allocation
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AcceleratorTier {
    #[default]
    None,
    TierA,
    TierB,
}

impl AcceleratorTier {
    pub const ALL: [AcceleratorTier; 3] = [Self::None, Self::TierA, Self::TierB];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TierA => "tier_a",
            Self::TierB => "tier_b",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "No accelerator",
            Self::TierA => "Accelerator tier A",
            Self::TierB => "Accelerator tier B",
        }
    }
}

/// Flat-fee optional capability, either enabled or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceId {
    MlOps,
    DataProcessing,
    Monitoring,
    Security,
}

impl ServiceId {
    pub const ALL: [ServiceId; 4] = [
        Self::MlOps,
        Self::DataProcessing,
        Self::Monitoring,
        Self::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MlOps => "ml_ops",
            Self::DataProcessing => "data_processing",
            Self::Monitoring => "monitoring",
            Self::Security => "security",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MlOps => "MLOps Platform",
            Self::DataProcessing => "Data Processing Pipeline",
            Self::Monitoring => "Advanced Monitoring",
            Self::Security => "Enhanced Security",
        }
    }
}

/// Support service level
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SupportTier {
    #[default]
    Basic,
    Business,
    Enterprise,
}

impl SupportTier {
    pub const ALL: [SupportTier; 3] = [Self::Basic, Self::Business, Self::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Business => "business",
            Self::Enterprise => "enterprise",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Basic => "Basic Support",
            Self::Business => "Business Support",
            Self::Enterprise => "Enterprise Support",
        }
    }
}

/// Parse a key against a closed set of variants.
///
/// Accepts the canonical snake_case key, case-insensitively, with `-` allowed
/// in place of `_` (so `tier-a` and `TIER_A` both resolve).
fn parse_variant<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    key: fn(&T) -> &'static str,
) -> Result<T, AppError> {
    let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
    all.iter()
        .copied()
        .find(|variant| key(variant) == normalized)
        .ok_or_else(|| AppError::UnknownValue {
            kind,
            value: value.to_string(),
            expected: all.iter().map(key).collect::<Vec<_>>().join(", "),
        })
}

impl FromStr for AcceleratorTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("accelerator tier", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for ServiceId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("service", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for SupportTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("support tier", s, &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for AcceleratorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SupportTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-unit monthly rates for metered resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitRates {
    pub core: Decimal,
    pub memory_gb: Decimal,
    pub fast_storage_gb: Decimal,
    pub archive_storage_gb: Decimal,
}

/// Flat monthly fee per accelerator tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcceleratorFees {
    pub none: Decimal,
    pub tier_a: Decimal,
    pub tier_b: Decimal,
}

impl AcceleratorFees {
    pub fn fee(&self, tier: AcceleratorTier) -> Decimal {
        match tier {
            AcceleratorTier::None => self.none,
            AcceleratorTier::TierA => self.tier_a,
            AcceleratorTier::TierB => self.tier_b,
        }
    }
}

/// Flat monthly fee per add-on service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceFees {
    pub ml_ops: Decimal,
    pub data_processing: Decimal,
    pub monitoring: Decimal,
    pub security: Decimal,
}

impl ServiceFees {
    pub fn fee(&self, service: ServiceId) -> Decimal {
        match service {
            ServiceId::MlOps => self.ml_ops,
            ServiceId::DataProcessing => self.data_processing,
            ServiceId::Monitoring => self.monitoring,
            ServiceId::Security => self.security,
        }
    }
}

/// Flat monthly fee per support tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportFees {
    pub basic: Decimal,
    pub business: Decimal,
    pub enterprise: Decimal,
}

impl SupportFees {
    pub fn fee(&self, tier: SupportTier) -> Decimal {
        match tier {
            SupportTier::Basic => self.basic,
            SupportTier::Business => self.business,
            SupportTier::Enterprise => self.enterprise,
        }
    }
}

/// Top-level cost category shown in the summary and charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Compute,
    Storage,
    Services,
    Support,
}

impl CostCategory {
    pub const ALL: [CostCategory; 4] = [
        Self::Compute,
        Self::Storage,
        Self::Services,
        Self::Support,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Storage => "Storage",
            Self::Services => "Services",
            Self::Support => "Support",
        }
    }
}

/// One priced row of a breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub category: CostCategory,
    pub label: String,
    /// Metered quantity; `None` for flat fees
    pub quantity: Option<u32>,
    pub unit_price: Decimal,
    pub amount: Decimal,
}

impl LineItem {
    pub fn metered(category: CostCategory, label: &str, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            category,
            label: label.to_string(),
            quantity: Some(quantity),
            unit_price,
            amount: Decimal::from(quantity) * unit_price,
        }
    }

    pub fn flat(category: CostCategory, label: &str, fee: Decimal) -> Self {
        Self {
            category,
            label: label.to_string(),
            quantity: None,
            unit_price: fee,
            amount: fee,
        }
    }
}

/// Itemized monthly cost for one configuration
///
/// Only constructed from line items, so `total_cost` always equals the sum of
/// the four category totals. Fields are read-only to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    compute_cost: Decimal,
    storage_cost: Decimal,
    services_cost: Decimal,
    support_cost: Decimal,
    total_cost: Decimal,
    line_items: Vec<LineItem>,
}

impl CostBreakdown {
    /// Create a zero-cost breakdown
    pub fn zero() -> Self {
        Self::from_line_items(Vec::new())
    }

    /// Build a breakdown by summing line items per category
    pub fn from_line_items(line_items: Vec<LineItem>) -> Self {
        let sum_of = |category: CostCategory| -> Decimal {
            line_items
                .iter()
                .filter(|item| item.category == category)
                .map(|item| item.amount)
                .sum()
        };

        let compute_cost = sum_of(CostCategory::Compute);
        let storage_cost = sum_of(CostCategory::Storage);
        let services_cost = sum_of(CostCategory::Services);
        let support_cost = sum_of(CostCategory::Support);

        Self {
            compute_cost,
            storage_cost,
            services_cost,
            support_cost,
            total_cost: compute_cost + storage_cost + services_cost + support_cost,
            line_items,
        }
    }

    pub fn compute_cost(&self) -> Decimal {
        self.compute_cost
    }

    pub fn storage_cost(&self) -> Decimal {
        self.storage_cost
    }

    pub fn services_cost(&self) -> Decimal {
        self.services_cost
    }

    pub fn support_cost(&self) -> Decimal {
        self.support_cost
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn category_cost(&self, category: CostCategory) -> Decimal {
        match category {
            CostCategory::Compute => self.compute_cost,
            CostCategory::Storage => self.storage_cost,
            CostCategory::Services => self.services_cost,
            CostCategory::Support => self.support_cost,
        }
    }

    /// Category totals in display order
    pub fn components(&self) -> [(CostCategory, Decimal); 4] {
        CostCategory::ALL.map(|category| (category, self.category_cost(category)))
    }
}

impl Default for CostBreakdown {
    fn default() -> Self {
        Self::zero()
    }
}
