//! Output module for corpus statistics
//!
//! This module handles:
//! - Re-scanning every persisted text artifact for URLs
//! - Splitting them into root and non-root counts
//! - Printing the result for the operator

pub mod stats;

pub use stats::{aggregate, harvest_urls, print_statistics, CorpusStatistics};
