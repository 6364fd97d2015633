//! # Tailrisk Ext File
//!
//! File-based and in-memory price sources for the Tailrisk toolkit.
//!
//! This crate provides [`PriceSource`](tailrisk_core::PriceSource)
//! implementations for offline analysis and tests:
//! - CSV price files, one per ticker or a single shared file
//! - An in-memory map of ticker to series
//!
//! Live market data feeds are out of scope; export the history to CSV first.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod csv_source;
mod memory;

pub use csv_source::*;
pub use memory::*;
