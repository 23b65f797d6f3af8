//! Identifier normalization: a numeric individual ID from free text.
//!
//! Field descriptions look like `"Individuo 7 - nota de campo"`; the ID is
//! the first maximal run of decimal digits anywhere in the text. Records
//! whose description yields no digits get the explicit unknown sentinel 0,
//! which also makes them sort first in the final report.

use super::{FieldIssue, TagField};

/// The sentinel identifier for an unknown or unparsable individual.
pub const UNKNOWN_ID: u64 = 0;

/// Extracts the individual identifier from a description.
///
/// Always yields a usable identifier; the optional [`FieldIssue`] records
/// why the sentinel was used. A digit run too large for `u64` saturates to
/// `u64::MAX`, ranking the record after every valid identifier instead of
/// interleaving unpredictably.
pub fn normalize_identifier(description: Option<&str>) -> (u64, Option<FieldIssue>) {
    let Some(text) = description.map(str::trim).filter(|text| !text.is_empty()) else {
        return (UNKNOWN_ID, Some(FieldIssue::missing(TagField::Description)));
    };

    match first_digit_run(text) {
        Some(run) => (run.parse().unwrap_or(u64::MAX), None),
        None => (
            UNKNOWN_ID,
            Some(FieldIssue::malformed_identifier(format!(
                "no digits in '{text}'"
            ))),
        ),
    }
}

/// Returns the first maximal contiguous run of ASCII digits, if any.
fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
