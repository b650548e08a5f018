//! Severity classification for incident type strings.
//!
//! Vancouver PD publishes free-text incident categories rather than a
//! structured taxonomy, so we use ordered keyword detection to assign a
//! severity score and marker color. The matching is case-insensitive and
//! the first matching rule wins.

use crate::{MarkerColor, Severity};

/// Classifies an incident type string into a severity score and marker
/// color.
///
/// Rules are evaluated top to bottom; "Sexual Assault" matches the
/// persons-offense rule before any later rule gets a chance. An empty
/// type string classifies as `(Low, Blue)`.
#[must_use]
pub fn classify_severity(raw: &str) -> (Severity, MarkerColor) {
    let lower = raw.to_lowercase();

    if contains_any(&lower, &["murder", "homicide"]) {
        return (Severity::Critical, MarkerColor::DarkRed);
    }
    if lower.contains("arson") {
        return (Severity::Critical, MarkerColor::Red);
    }
    if contains_any(&lower, &["assault", "violent", "sex", "robbery"]) {
        return (Severity::High, MarkerColor::Orange);
    }
    if contains_any(
        &lower,
        &["break and enter", "theft", "shoplifting", "vehicle"],
    ) {
        return (Severity::Moderate, MarkerColor::Yellow);
    }
    if contains_any(&lower, &["drug", "misconduct", "public"]) || lower.is_empty() {
        return (Severity::Low, MarkerColor::Blue);
    }

    (Severity::Low, MarkerColor::LightBlue)
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
