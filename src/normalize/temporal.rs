//! Timestamp normalization: EXIF `"YYYY:MM:DD HH:MM:SS"` into row fields.
//!
//! The date and time halves degrade independently: a record with a readable
//! date but a mangled time still gets its date, and vice versa. The ISO
//! field is stricter, it re-parses the normalized halves together and is
//! only populated when both are valid.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{FieldIssue, TagField};

/// The three timestamp-derived row fields, each independently fallible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemporalFields {
    /// Capture date as `"DD-MM-YYYY"`.
    pub date: Result<String, FieldIssue>,

    /// Capture time as `"HH:MM:SS"`.
    pub time: Result<String, FieldIssue>,

    /// Combined instant as `"YYYY-MM-DDTHH:MM:SS"`.
    pub iso: Result<String, FieldIssue>,
}

/// Normalizes one raw capture timestamp.
///
/// The raw text splits on the first space into a date segment and a time
/// segment. EXIF dates use colons (`"2023:04:05"`); only the first two
/// colons are replaced with hyphens so a stray colon later in the segment
/// still fails the calendar parse instead of silently shifting fields.
pub fn normalize_timestamp(raw: Option<&str>) -> TemporalFields {
    let Some(raw) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        let missing = FieldIssue::missing(TagField::CaptureTimestamp);
        return TemporalFields {
            date: Err(missing.clone()),
            time: Err(missing.clone()),
            iso: Err(missing),
        };
    };

    let (date_segment, time_segment) = match raw.split_once(' ') {
        Some((date, time)) => (date, Some(time)),
        None => (raw, None),
    };

    let date = normalize_date(date_segment);
    let time = normalize_time(time_segment);

    // ISO requires both halves; re-parse the normalized pair as one instant
    // so a date/time combination that is individually plausible but jointly
    // invalid still falls back to the sentinel.
    let iso = match (&date, &time) {
        (Ok(date), Ok(time)) => {
            NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%d-%m-%Y %H:%M:%S")
                .map(|instant| instant.format("%Y-%m-%dT%H:%M:%S").to_string())
                .map_err(|e| FieldIssue::malformed_timestamp(format!("composite parse: {e}")))
        }
        (Err(issue), _) | (_, Err(issue)) => Err(issue.clone()),
    };

    TemporalFields { date, time, iso }
}

fn normalize_date(segment: &str) -> Result<String, FieldIssue> {
    let hyphenated = segment.trim().replacen(':', "-", 2);
    NaiveDate::parse_from_str(&hyphenated, "%Y-%m-%d")
        .map(|date| date.format("%d-%m-%Y").to_string())
        .map_err(|_| FieldIssue::malformed_timestamp(format!("unparsable date '{segment}'")))
}

fn normalize_time(segment: Option<&str>) -> Result<String, FieldIssue> {
    let segment = segment
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| FieldIssue::malformed_timestamp("time segment missing"))?;

    // Keep the text verbatim, but only if it really is zero-padded
    // HH:MM:SS; chrono alone would accept single-digit hours.
    let shaped = segment.len() == 8
        && segment
            .char_indices()
            .all(|(i, c)| if i == 2 || i == 5 { c == ':' } else { c.is_ascii_digit() });

    if shaped && NaiveTime::parse_from_str(segment, "%H:%M:%S").is_ok() {
        Ok(segment.to_string())
    } else {
        Err(FieldIssue::malformed_timestamp(format!(
            "unparsable time '{segment}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::IssueKind;

    #[test]
    fn canonical_timestamp_produces_all_three_fields() {
        let fields = normalize_timestamp(Some("2023:04:05 10:20:30"));
        assert_eq!(fields.date.unwrap(), "05-04-2023");
        assert_eq!(fields.time.unwrap(), "10:20:30");
        assert_eq!(fields.iso.unwrap(), "2023-04-05T10:20:30");
    }

    #[test]
    fn absent_timestamp_fails_all_three_fields() {
        let fields = normalize_timestamp(None);
        for result in [&fields.date, &fields.time, &fields.iso] {
            let issue = result.as_ref().unwrap_err();
            assert_eq!(issue.kind, IssueKind::ExtractionMissing);
        }
    }

    #[test]
    fn blank_timestamp_counts_as_absent() {
        let fields = normalize_timestamp(Some("   "));
        assert!(fields.date.is_err());
        assert!(fields.time.is_err());
        assert!(fields.iso.is_err());
    }

    #[test]
    fn missing_time_segment_keeps_the_date() {
        let fields = normalize_timestamp(Some("2023:04:05"));
        assert_eq!(fields.date.unwrap(), "05-04-2023");
        assert!(fields.time.is_err());
        assert!(fields.iso.is_err());
    }

    #[test]
    fn mangled_date_keeps_the_time() {
        let fields = normalize_timestamp(Some("not:a:date 10:20:30"));
        assert!(fields.date.is_err());
        assert_eq!(fields.time.unwrap(), "10:20:30");
        assert!(fields.iso.is_err());
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let fields = normalize_timestamp(Some("2023:02:30 10:20:30"));
        assert!(fields.date.is_err());
    }

    #[test]
    fn time_with_out_of_range_minutes_is_rejected() {
        let fields = normalize_timestamp(Some("2023:04:05 10:99:30"));
        assert_eq!(fields.date.unwrap(), "05-04-2023");
        assert!(fields.time.is_err());
        assert!(fields.iso.is_err());
    }

    #[test]
    fn unpadded_time_is_rejected() {
        let fields = normalize_timestamp(Some("2023:04:05 9:20:30"));
        assert!(fields.time.is_err());
    }

    #[test]
    fn surrounding_whitespace_on_time_is_trimmed() {
        let fields = normalize_timestamp(Some("2023:04:05  10:20:30 "));
        assert_eq!(fields.time.unwrap(), "10:20:30");
        assert_eq!(fields.iso.unwrap(), "2023-04-05T10:20:30");
    }
}
