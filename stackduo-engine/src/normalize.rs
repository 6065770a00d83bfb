//! Value normalization shared by both report paths.

use stackduo_types::AverageAnswers;

/// Placeholder written into missing locations before sorting
pub const MISSING_LOCATION: &str = "None";

/// Round `value` to `digits` decimal places, ties to even.
///
/// The value is scaled, rounded with `round_ties_even` and scaled back, so
/// 1.25 becomes 1.2 and 1.35 becomes 1.4.
pub fn round_half_even(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round_ties_even() / factor
}

/// Trim and lower-case
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalize a location; the missing-location placeholder (in any case)
/// becomes `None`.
pub fn normalize_location(location: Option<&str>) -> Option<String> {
    let normalized = normalize_text(location?);
    if normalized == MISSING_LOCATION.to_lowercase() {
        None
    } else {
        Some(normalized)
    }
}

/// Build a comparison-ready average-answers row
pub fn average_answers_row(
    account_id: i64,
    display_name: &str,
    location: Option<&str>,
    average_answers_count: f64,
) -> AverageAnswers {
    AverageAnswers {
        account_id: account_id as f64,
        display_name: normalize_text(display_name),
        location: normalize_location(location),
        average_answers_count,
    }
}
