//! Tolerant extraction of a structured report from a model response
//!
//! The inference endpoint returns free-form text with no contractual
//! structure, so extraction is best-effort: each field is located by its
//! label, the value span runs to the next recognized label or the end of
//! the response, and anything that cannot be extracted falls back to the
//! field's sentinel default. The parse never fails.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{PercentValue, RiceQualityReport};
use crate::validation::clamp_percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    RiceType,
    BrokenGrains,
    Discoloration,
    Impurities,
    ForeignObjects,
    Recommendation,
}

/// Label aliases per field, longest first so the most specific wins when
/// several match at the same position.
const FIELD_LABELS: &[(Field, &[&str])] = &[
    (
        Field::RiceType,
        &[
            "rice type classification",
            "rice variety",
            "rice type",
            "type of rice",
        ],
    ),
    (
        Field::BrokenGrains,
        &["broken grains", "broken grain", "broken kernels", "broken"],
    ),
    (
        Field::Discoloration,
        &[
            "discoloured grains",
            "discolored grains",
            "discolouration",
            "discoloration",
        ],
    ),
    (Field::Impurities, &["impurities", "impurity"]),
    (
        Field::ForeignObjects,
        &[
            "foreign object detection",
            "foreign objects",
            "foreign object",
            "foreign material",
            "foreign matter",
        ],
    ),
    (Field::Recommendation, &["recommendations", "recommendation"]),
];

/// A label occurrence in the response text
#[derive(Debug, Clone, Copy)]
struct LabelMatch {
    field: Field,
    start: usize,
    end: usize,
}

/// Parse a raw model response into a fully populated report.
///
/// Total and pure: any input, including an empty string or unrelated
/// prose, yields a report with every field set, and the same input always
/// yields the same report.
pub fn parse_report(response: &str) -> RiceQualityReport {
    let matches = locate_labels(response);

    let mut report = RiceQualityReport::default();
    for m in &matches {
        let span = value_span(response, m, &matches);
        match m.field {
            Field::RiceType => {
                if let Some(value) = clean_text_value(span) {
                    report.rice_type = value;
                }
            }
            Field::BrokenGrains => report.broken_grains_percent = extract_percent(span),
            Field::Discoloration => report.discoloration_percent = extract_percent(span),
            Field::Impurities => report.impurities_percent = extract_percent(span),
            Field::ForeignObjects => {
                if let Some(value) = clean_text_value(span) {
                    report.foreign_objects = value;
                }
            }
            Field::Recommendation => {
                if let Some(value) = clean_text_value(span) {
                    report.recommendation = value;
                }
            }
        }
    }

    debug_assert!(!report.rice_type.is_empty());
    report
}

/// Find the earliest occurrence of each field's label
fn locate_labels(text: &str) -> Vec<LabelMatch> {
    let mut matches = Vec::new();
    for (field, aliases) in FIELD_LABELS {
        let mut best: Option<LabelMatch> = None;
        for alias in *aliases {
            if let Some(start) = find_label(text, alias) {
                let candidate = LabelMatch {
                    field: *field,
                    start,
                    end: start + alias.len(),
                };
                // Aliases are ordered longest first, so a strict `<` keeps
                // the most specific match at any shared position.
                if best.map(|b| candidate.start < b.start).unwrap_or(true) {
                    best = Some(candidate);
                }
            }
        }
        if let Some(m) = best {
            matches.push(m);
        }
    }
    matches
}

/// The value span for a match: from the end of its label to the start of
/// the next recognized label, or the end of the response.
fn value_span<'a>(text: &'a str, m: &LabelMatch, all: &[LabelMatch]) -> &'a str {
    let end = all
        .iter()
        .filter(|other| other.start >= m.end && other.field != m.field)
        .map(|other| other.start)
        .min()
        .unwrap_or(text.len());
    &text[m.end..end]
}

/// ASCII case-insensitive substring search; label alphabets are ASCII so
/// returned offsets are always valid char boundaries.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Find a label occurrence that sits on a word boundary, so "broken" does
/// not match inside "unbroken".
fn find_label(text: &str, label: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(pos) = find_ascii_ci(&text[from..], label).map(|p| p + from) {
        let end = pos + label.len();
        let boundary_before = pos == 0 || !bytes[pos - 1].is_ascii_alphanumeric();
        let boundary_after = end == bytes.len() || !bytes[end].is_ascii_alphabetic();
        if boundary_before && boundary_after {
            return Some(pos);
        }
        from = pos + 1;
    }
    None
}

/// Extract the first numeric token from a value span and clamp it into
/// [0, 100]. Anything non-numeric yields `NotReported`.
fn extract_percent(span: &str) -> PercentValue {
    let mut token = String::new();
    let mut chars = span.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            token.push(c);
            while let Some(&next) = chars.peek() {
                if next.is_ascii_digit() || (next == '.' && !token.contains('.')) {
                    token.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            break;
        }
    }
    let token = token.trim_end_matches('.');
    match Decimal::from_str(token) {
        Ok(value) => PercentValue::Reported(clamp_percent(value)),
        Err(_) => PercentValue::NotReported,
    }
}

/// Strip separator punctuation and markdown noise from a text span and
/// collapse whitespace runs. Returns `None` when nothing usable remains,
/// in which case the field keeps its sentinel default.
fn clean_text_value(span: &str) -> Option<String> {
    let stripped = span.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, ':' | '-' | '–' | '—' | '*' | '.' | ',' | ')' | '#')
    });
    let stripped =
        stripped.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '(' | '#'));

    let collapsed = stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("**", "");

    let cleaned = collapsed.trim().to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
