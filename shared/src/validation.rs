//! Validation utilities for the Rice Quality Analyzer

use rust_decimal::Decimal;

use crate::models::ImageKind;

/// Validate that a percentage metric is within [0, 100]
pub fn validate_percent(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
        return Err("percentage must be between 0 and 100");
    }
    Ok(())
}

/// Clamp a percentage metric into [0, 100].
///
/// Out-of-range model output is clamped rather than rejected so the
/// report stays fully populated.
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::from(100))
}

/// Check whether a MIME type names an accepted upload format
pub fn is_supported_image_mime(mime: &str) -> bool {
    ImageKind::from_mime(mime).is_some()
}
