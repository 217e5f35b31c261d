//! Rice quality report model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel used when the model did not name a rice variety
pub const DEFAULT_RICE_TYPE: &str = "Unknown";

/// Sentinel used when no foreign objects were reported
pub const DEFAULT_FOREIGN_OBJECTS: &str = "None detected";

/// Sentinel used when the model gave no recommendation
pub const DEFAULT_RECOMMENDATION: &str = "No recommendation available";

/// A percentage metric extracted from the model response.
///
/// `Reported` values are always within [0, 100]; values the parser could
/// not extract become `NotReported` rather than failing the report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PercentValue {
    Reported(Decimal),
    NotReported,
}

impl PercentValue {
    pub fn is_reported(&self) -> bool {
        matches!(self, PercentValue::Reported(_))
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            PercentValue::Reported(v) => Some(*v),
            PercentValue::NotReported => None,
        }
    }
}

impl std::fmt::Display for PercentValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PercentValue::Reported(v) => write!(f, "{}%", v),
            PercentValue::NotReported => write!(f, "Not reported"),
        }
    }
}

/// The canonical structured result of one analysis.
///
/// Invariant: every field is populated. Fields the parser could not
/// extract carry their sentinel default, so the report is always
/// renderable in full.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiceQualityReport {
    pub rice_type: String,
    pub broken_grains_percent: PercentValue,
    pub discoloration_percent: PercentValue,
    pub impurities_percent: PercentValue,
    pub foreign_objects: String,
    pub recommendation: String,
}

impl Default for RiceQualityReport {
    fn default() -> Self {
        Self {
            rice_type: DEFAULT_RICE_TYPE.to_string(),
            broken_grains_percent: PercentValue::NotReported,
            discoloration_percent: PercentValue::NotReported,
            impurities_percent: PercentValue::NotReported,
            foreign_objects: DEFAULT_FOREIGN_OBJECTS.to_string(),
            recommendation: DEFAULT_RECOMMENDATION.to_string(),
        }
    }
}

impl RiceQualityReport {
    /// Ordered label/value pairs for rendering. Every field is always
    /// present, sentinel defaults included.
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Rice Type", self.rice_type.clone()),
            ("Broken Grains", self.broken_grains_percent.to_string()),
            ("Discoloration", self.discoloration_percent.to_string()),
            ("Impurities", self.impurities_percent.to_string()),
            ("Foreign Objects", self.foreign_objects.clone()),
            ("Recommendation", self.recommendation.clone()),
        ]
    }

    /// Plain display form, one `Label: value` line per field
    pub fn to_display_text(&self) -> String {
        self.display_fields()
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_report_is_fully_populated() {
        let report = RiceQualityReport::default();
        assert_eq!(report.rice_type, DEFAULT_RICE_TYPE);
        assert_eq!(report.broken_grains_percent, PercentValue::NotReported);
        assert_eq!(report.foreign_objects, DEFAULT_FOREIGN_OBJECTS);
        assert_eq!(report.recommendation, DEFAULT_RECOMMENDATION);
    }

    #[test]
    fn test_display_fields_never_omit_a_field() {
        let fields = RiceQualityReport::default().display_fields();
        let labels: Vec<_> = fields.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            [
                "Rice Type",
                "Broken Grains",
                "Discoloration",
                "Impurities",
                "Foreign Objects",
                "Recommendation"
            ]
        );
        assert!(fields.iter().all(|(_, value)| !value.is_empty()));
    }

    #[test]
    fn test_percent_display() {
        let reported = PercentValue::Reported(Decimal::from_str("4.5").unwrap());
        assert_eq!(reported.to_string(), "4.5%");
        assert_eq!(PercentValue::NotReported.to_string(), "Not reported");
    }

    #[test]
    fn test_percent_serializes_as_value_or_null() {
        let reported = PercentValue::Reported(Decimal::from_str("2.3").unwrap());
        assert_eq!(serde_json::to_string(&reported).unwrap(), "\"2.3\"");
        assert_eq!(
            serde_json::to_string(&PercentValue::NotReported).unwrap(),
            "null"
        );
        let back: PercentValue = serde_json::from_str("null").unwrap();
        assert_eq!(back, PercentValue::NotReported);
    }

    #[test]
    fn test_display_text_lists_all_fields() {
        let text = RiceQualityReport::default().to_display_text();
        assert!(text.contains("Rice Type: Unknown"));
        assert!(text.contains("Broken Grains: Not reported"));
        assert!(text.contains("Recommendation: No recommendation available"));
    }
}
