//! Domain models for the Rice Quality Analyzer

mod analysis;
mod image;
mod report;

pub use analysis::*;
pub use image::*;
pub use report::*;
