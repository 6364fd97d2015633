//! Stress testing against historical crises.
//!
//! This module provides:
//! - Crisis shock tables per asset type, with a built-in standard table
//! - Selection of crises by name or by 1-based position
//! - Gradual, compounding application of shocks to a price series
//!
//! The stressed series is fed back through the return, VaR and shortfall
//! calculations to obtain stressed risk metrics.

mod engine;
mod scenarios;

pub use engine::*;
pub use scenarios::*;
