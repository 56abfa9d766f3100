// Analyzer module: price analysis engine plus catalog helpers for item/store pickers.

pub mod catalog;
pub mod price_analysis;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, AnalyzerImpl};
