//! Shared types and core logic for the Rice Quality Analyzer
//!
//! This crate contains the domain model, the model-response parser and the
//! validation helpers shared between the backend and the browser (via WASM).
//! It performs no I/O: everything here is pure data transformation.

pub mod models;
pub mod parse;
pub mod validation;

pub use models::*;
pub use parse::parse_report;
pub use validation::*;
