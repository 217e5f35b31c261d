//! Services for the Rice Quality Analyzer

pub mod analysis;
pub mod ingestion;
pub mod render;

pub use analysis::AnalysisService;
