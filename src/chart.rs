//! Presentation adapter: chart-ready series and currency strings derived
//! from a [`CostBreakdown`].

use crate::pricing::{CostBreakdown, CostCategory};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

/// Display colour for a category, as `(r, g, b)`
fn category_rgb(category: CostCategory) -> (u8, u8, u8) {
    match category {
        CostCategory::Compute => (54, 162, 235),
        CostCategory::Storage => (75, 192, 192),
        CostCategory::Services => (153, 102, 255),
        CostCategory::Support => (255, 159, 64),
    }
}

fn rgba(category: CostCategory, alpha: &str) -> String {
    let (r, g, b) = category_rgb(category);
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

/// Distribution series (pie chart) over the four categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<&'static str>,
    pub values: Vec<Decimal>,
    /// Share of the total per category, in percent
    pub shares: Vec<Decimal>,
    pub background_colors: Vec<String>,
    pub border_colors: Vec<String>,
}

/// One dataset of the stacked bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDataset {
    pub label: &'static str,
    pub data: Vec<Decimal>,
    pub background_color: String,
}

impl ChartSeries {
    pub fn from_breakdown(breakdown: &CostBreakdown) -> Self {
        let components = breakdown.components();

        Self {
            labels: components.iter().map(|(c, _)| c.label()).collect(),
            values: components.iter().map(|(_, v)| *v).collect(),
            shares: category_shares(breakdown),
            background_colors: components.iter().map(|(c, _)| rgba(*c, "0.8")).collect(),
            border_colors: components.iter().map(|(c, _)| rgba(*c, "1")).collect(),
        }
    }
}

/// Stacked bar datasets, one per category, under a single bar
pub fn stacked_bar(breakdown: &CostBreakdown) -> Vec<BarDataset> {
    breakdown
        .components()
        .iter()
        .map(|(category, value)| BarDataset {
            label: category.label(),
            data: vec![*value],
            background_color: rgba(*category, "0.8"),
        })
        .collect()
}

/// Percentage of the total per category, rounded to two places.
/// An all-zero breakdown yields all-zero shares.
pub fn category_shares(breakdown: &CostBreakdown) -> Vec<Decimal> {
    let total = breakdown.total_cost();

    breakdown
        .components()
        .iter()
        .map(|(_, value)| {
            if total.is_zero() {
                Decimal::ZERO
            } else {
                (*value * dec!(100) / total)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            }
        })
        .collect()
}

/// Format an amount as `$12,345.60`
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let mut magnitude = rounded.abs();
    magnitude.rescale(2);
    let plain = magnitude.to_string();
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!("{}${}.{}", sign, group_thousands(whole), fraction)
}

/// Format a monthly amount as `$12,345.60/mo`
pub fn format_monthly(amount: Decimal) -> String {
    format!("{}/mo", format_usd(amount))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
