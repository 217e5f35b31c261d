//! HTTP handlers for the Rice Quality Analyzer

pub mod analysis;
pub mod health;

pub use analysis::*;
pub use health::*;
