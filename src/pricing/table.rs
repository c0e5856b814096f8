use crate::error::AppError;
use crate::pricing::loader::PricingTableFile;
use crate::pricing::models::{
    AcceleratorFees, AcceleratorTier, ServiceFees, ServiceId, SupportFees, SupportTier, UnitRates,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Versioned, read-only price list
///
/// Every construction path (`new`, deserialization) validates the table, and
/// no mutating accessor exists, so a `PricingTable` in hand is always complete,
/// non-negative and cannot overflow a breakdown for any `u32` quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PricingTableFile")]
pub struct PricingTable {
    version: String,
    currency: String,
    rates: UnitRates,
    accelerators: AcceleratorFees,
    services: ServiceFees,
    support: SupportFees,
}

impl PricingTable {
    /// Create a pricing table, rejecting empty labels, negative prices and
    /// prices large enough to overflow a total
    pub fn new(
        version: impl Into<String>,
        currency: impl Into<String>,
        rates: UnitRates,
        accelerators: AcceleratorFees,
        services: ServiceFees,
        support: SupportFees,
    ) -> Result<Self, AppError> {
        let table = Self {
            version: version.into(),
            currency: currency.into(),
            rates,
            accelerators,
            services,
            support,
        };
        table.validate()?;
        Ok(table)
    }

    /// Built-in enterprise price list
    pub fn standard() -> Self {
        Self {
            version: "standard-2024".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            rates: UnitRates {
                core: dec!(40),
                memory_gb: dec!(6.5),
                fast_storage_gb: dec!(0.15),
                archive_storage_gb: dec!(0.05),
            },
            accelerators: AcceleratorFees {
                none: dec!(0),
                tier_a: dec!(2500),
                tier_b: dec!(4000),
            },
            services: ServiceFees {
                ml_ops: dec!(2000),
                data_processing: dec!(1500),
                monitoring: dec!(800),
                security: dec!(1200),
            },
            support: SupportFees {
                basic: dec!(0),
                business: dec!(1000),
                enterprise: dec!(5000),
            },
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.version.trim().is_empty() {
            return Err(AppError::InvalidPricing("version cannot be empty".to_string()));
        }
        if self.currency.trim().is_empty() {
            return Err(AppError::InvalidPricing("currency cannot be empty".to_string()));
        }

        let negative: Vec<String> = self
            .price_entries()
            .into_iter()
            .filter(|(_, price)| price.is_sign_negative() && !price.is_zero())
            .map(|(key, price)| format!("{} = {}", key, price))
            .collect();

        if !negative.is_empty() {
            return Err(AppError::InvalidPricing(format!(
                "prices must be non-negative: {}",
                negative.join(", ")
            )));
        }

        if self.worst_case_total().is_none() {
            return Err(AppError::InvalidPricing(format!(
                "prices too large: the monthly total for {} units of every quantity, \
                 the dearest tiers and every service does not fit in a decimal",
                u32::MAX
            )));
        }

        Ok(())
    }

    /// Largest total any configuration can produce, scaled by 100 so share
    /// percentages fit as well. `None` when that overflows.
    fn worst_case_total(&self) -> Option<Decimal> {
        let max_quantity = Decimal::from(u32::MAX);

        let metered = [
            self.rates.core,
            self.rates.memory_gb,
            self.rates.fast_storage_gb,
            self.rates.archive_storage_gb,
        ]
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, rate| {
            sum.checked_add(rate.checked_mul(max_quantity)?)
        })?;

        let services = ServiceId::ALL
            .into_iter()
            .try_fold(Decimal::ZERO, |sum, service| {
                sum.checked_add(self.services.fee(service))
            })?;

        let accelerator = AcceleratorTier::ALL
            .into_iter()
            .map(|tier| self.accelerators.fee(tier))
            .max()
            .unwrap_or_default();
        let support = SupportTier::ALL
            .into_iter()
            .map(|tier| self.support.fee(tier))
            .max()
            .unwrap_or_default();

        metered
            .checked_add(services)?
            .checked_add(accelerator)?
            .checked_add(support)?
            .checked_mul(dec!(100))
    }

    /// Every price in the table, keyed by its `section.key` path
    pub fn price_entries(&self) -> Vec<(String, Decimal)> {
        let mut entries = vec![
            ("rates.core".to_string(), self.rates.core),
            ("rates.memory_gb".to_string(), self.rates.memory_gb),
            ("rates.fast_storage_gb".to_string(), self.rates.fast_storage_gb),
            ("rates.archive_storage_gb".to_string(), self.rates.archive_storage_gb),
        ];
        entries.extend(
            AcceleratorTier::ALL
                .iter()
                .map(|tier| (format!("accelerators.{}", tier), self.accelerators.fee(*tier))),
        );
        entries.extend(
            ServiceId::ALL
                .iter()
                .map(|service| (format!("services.{}", service), self.services.fee(*service))),
        );
        entries.extend(
            SupportTier::ALL
                .iter()
                .map(|tier| (format!("support.{}", tier), self.support.fee(*tier))),
        );
        entries
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn rates(&self) -> &UnitRates {
        &self.rates
    }

    pub fn accelerator_fee(&self, tier: AcceleratorTier) -> Decimal {
        self.accelerators.fee(tier)
    }

    pub fn service_fee(&self, service: ServiceId) -> Decimal {
        self.services.fee(service)
    }

    pub fn support_fee(&self, tier: SupportTier) -> Decimal {
        self.support.fee(tier)
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::standard()
    }
}
