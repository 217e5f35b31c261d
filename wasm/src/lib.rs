//! WebAssembly module for the Rice Quality Analyzer
//!
//! Exposes the shared parsing and validation core to the browser page so
//! the frontend can preview a report, check upload types, and format
//! fields without a server round trip.

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Parse a raw model response into a report, returned as JSON
#[wasm_bindgen]
pub fn parse_model_response(raw: &str) -> Result<String, JsValue> {
    let report = shared::parse_report(raw);
    serde_json::to_string(&report)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize report: {}", e)))
}

/// Format a JSON report as its plain display text
#[wasm_bindgen]
pub fn report_display_text(report_json: &str) -> Result<String, JsValue> {
    let report: RiceQualityReport = serde_json::from_str(report_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid report JSON: {}", e)))?;
    Ok(report.to_display_text())
}

/// Check whether a MIME type names an accepted upload format
#[wasm_bindgen]
pub fn is_supported_image_type(mime: &str) -> bool {
    is_supported_image_mime(mime)
}

/// Clamp a percentage into [0, 100]
#[wasm_bindgen]
pub fn clamp_percent_value(value: f64) -> f64 {
    let decimal = Decimal::try_from(value).unwrap_or(Decimal::ZERO);
    clamp_percent(decimal).to_string().parse().unwrap_or(0.0)
}
