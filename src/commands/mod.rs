//! Command implementations for the CLI
//!
//! - estimate: price a configuration and print the breakdown
//! - pricing: show or validate the pricing table
//! - config: display the effective configuration

pub mod config;
pub mod estimate;
pub mod pricing;
