//! Coordinate normalization: raw DMS triples into formatted DMS strings.
//!
//! EXIF GPS tags store each axis as three rationals (degrees, minutes,
//! seconds). Upstream sources are inconsistent about the component shape
//! (`"23"` vs `"23/1"`) and occasionally emit out-of-range minutes or
//! seconds, so parsing is permissive and the sexagesimal parts are clamped
//! before formatting. The hemisphere letter comes from the sign of the
//! degrees component; the formatted output always uses the magnitude.

use super::{FieldIssue, TagField};
use crate::tags::RawDms;

const MINUTES_MAX: i64 = 59;
const SECONDS_MAX: f64 = 59.999;

/// Which coordinate axis a triple belongs to.
///
/// The axis determines the hemisphere code pair: latitude uses S/N,
/// longitude uses W/E.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// The hemisphere letter for a degrees value of the given sign.
    fn hemisphere(&self, negative: bool) -> char {
        match (self, negative) {
            (Axis::Latitude, true) => 'S',
            (Axis::Latitude, false) => 'N',
            (Axis::Longitude, true) => 'W',
            (Axis::Longitude, false) => 'E',
        }
    }

    /// The raw tag this axis is extracted from, for issue reporting.
    fn field(&self) -> TagField {
        match self {
            Axis::Latitude => TagField::Latitude,
            Axis::Longitude => TagField::Longitude,
        }
    }
}

/// Normalizes one coordinate axis into a formatted DMS string.
///
/// Returns strings shaped like `S23°30'15.00000"`. A missing triple or any
/// unparsable component yields a [`FieldIssue`], never a panic; the caller
/// substitutes the sentinel.
pub fn normalize_axis(raw: Option<&RawDms>, axis: Axis) -> Result<String, FieldIssue> {
    let field = axis.field();
    let raw = raw.ok_or_else(|| FieldIssue::missing(field))?;

    let degrees = parse_component(&raw.degrees)
        .ok_or_else(|| malformed(field, "degrees", &raw.degrees))?;
    let minutes = parse_component(&raw.minutes)
        .ok_or_else(|| malformed(field, "minutes", &raw.minutes))?;
    let seconds = parse_component(&raw.seconds)
        .ok_or_else(|| malformed(field, "seconds", &raw.seconds))?;

    // is_sign_negative keeps the hemisphere of a "-0/1" degrees component,
    // which a plain < 0.0 comparison would lose.
    let hemisphere = axis.hemisphere(degrees.is_sign_negative());
    let degrees = degrees.abs().trunc() as u64;
    let minutes = (minutes.trunc() as i64).clamp(0, MINUTES_MAX);
    let seconds = seconds.clamp(0.0, SECONDS_MAX);

    Ok(format!(
        "{}{}°{}'{:.5}\"",
        hemisphere, degrees, minutes, seconds
    ))
}

/// Parses one component: either a decimal literal or an `"n/d"` fraction.
///
/// A zero denominator, non-numeric text, or a non-finite result is a parse
/// failure for the component.
fn parse_component(text: &str) -> Option<f64> {
    let text = text.trim();
    let value = match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.trim().parse().ok()?;
            let denominator: f64 = denominator.trim().parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            numerator / denominator
        }
        None => text.parse().ok()?,
    };

    value.is_finite().then_some(value)
}

fn malformed(field: TagField, component: &str, text: &str) -> FieldIssue {
    FieldIssue::malformed_coordinate(field, format!("unparsable {component} '{text}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::IssueKind;

    fn lat(degrees: &str, minutes: &str, seconds: &str) -> Result<String, FieldIssue> {
        normalize_axis(Some(&RawDms::new(degrees, minutes, seconds)), Axis::Latitude)
    }

    #[test]
    fn negative_degrees_select_southern_hemisphere() {
        assert_eq!(lat("-23", "30", "15/1").unwrap(), "S23°30'15.00000\"");
    }

    #[test]
    fn non_negative_degrees_select_northern_hemisphere() {
        assert_eq!(lat("23", "30", "15/1").unwrap(), "N23°30'15.00000\"");
    }

    #[test]
    fn longitude_uses_west_east_codes() {
        let raw = RawDms::new("-46/1", "38", "4020/100");
        let formatted = normalize_axis(Some(&raw), Axis::Longitude).unwrap();
        assert_eq!(formatted, "W46°38'40.20000\"");
    }

    #[test]
    fn negative_zero_degrees_keep_the_sign() {
        assert_eq!(lat("-0/1", "30", "0/1").unwrap(), "S0°30'0.00000\"");
    }

    #[test]
    fn minutes_above_range_clamp_to_59() {
        assert_eq!(lat("10", "75", "0").unwrap(), "N10°59'0.00000\"");
    }

    #[test]
    fn negative_seconds_clamp_to_zero() {
        assert_eq!(lat("10", "5", "-3").unwrap(), "N10°5'0.00000\"");
    }

    #[test]
    fn seconds_above_range_clamp_to_59_999() {
        assert_eq!(lat("10", "5", "70.5").unwrap(), "N10°5'59.99900\"");
    }

    #[test]
    fn fractional_minutes_truncate() {
        assert_eq!(lat("10", "30.9", "0").unwrap(), "N10°30'0.00000\"");
    }

    #[test]
    fn missing_triple_is_an_extraction_issue() {
        let issue = normalize_axis(None, Axis::Latitude).unwrap_err();
        assert_eq!(issue.kind, IssueKind::ExtractionMissing);
        assert_eq!(issue.field, TagField::Latitude);
    }

    #[test]
    fn zero_denominator_is_malformed() {
        let issue = lat("23", "30", "15/0").unwrap_err();
        assert_eq!(issue.kind, IssueKind::MalformedCoordinate);
        assert!(issue.message.contains("seconds"));
    }

    #[test]
    fn non_numeric_component_is_malformed() {
        let issue = lat("abc", "30", "15").unwrap_err();
        assert_eq!(issue.kind, IssueKind::MalformedCoordinate);
        assert!(issue.message.contains("degrees"));
    }

    #[test]
    fn normalization_is_deterministic() {
        let raw = RawDms::new("-23/1", "1830/60", "1234/100");
        let first = normalize_axis(Some(&raw), Axis::Latitude).unwrap();
        let second = normalize_axis(Some(&raw), Axis::Latitude).unwrap();
        assert_eq!(first, second);
    }
}
