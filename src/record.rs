//! The normalized record: one fully populated row per input image.
//!
//! Assembly merges the three normalizer outputs for one raw tag set into a
//! [`NormalizedRecord`], folding every per-field failure into its sentinel
//! so the row schema is always complete. Ordering is a separate step that
//! runs only after the whole batch has been assembled.

use crate::normalize::{
    normalize_axis, normalize_identifier, normalize_timestamp, Axis, FieldIssue,
};
use crate::tags::RawImageTags;

/// The sentinel written wherever a string field could not be derived.
pub const UNAVAILABLE: &str = "unavailable";

/// One normalized row of the report.
///
/// Every field is always populated, with a value or a sentinel: string
/// fields fall back to [`UNAVAILABLE`], the identifier falls back to 0.
/// Records are immutable once assembled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Numeric individual identifier; 0 means unknown.
    pub individual_id: u64,

    /// Combined `"<latDMS>; <lonDMS>"` coordinate string.
    pub coordinates: String,

    /// Capture date as `"DD-MM-YYYY"`.
    pub capture_date: String,

    /// Capture time as `"HH:MM:SS"`.
    pub capture_time: String,

    /// Combined instant as `"YYYY-MM-DDTHH:MM:SS"`.
    pub iso_timestamp: String,
}

/// Assembles one record from one raw tag set.
///
/// Never fails: anything the normalizers could not derive becomes a
/// sentinel, and the reasons are returned alongside the record for the
/// batch report. The two coordinate axes are normalized independently, but
/// the combined field is all-or-nothing: if either axis failed the whole
/// coordinate string is the sentinel.
pub fn assemble(tags: &RawImageTags) -> (NormalizedRecord, Vec<FieldIssue>) {
    let mut issues = Vec::new();

    let (individual_id, id_issue) = normalize_identifier(tags.description.as_deref());
    issues.extend(id_issue);

    let latitude = normalize_axis(tags.latitude.as_ref(), Axis::Latitude);
    let longitude = normalize_axis(tags.longitude.as_ref(), Axis::Longitude);
    let coordinates = match (latitude, longitude) {
        (Ok(lat), Ok(lon)) => format!("{lat}; {lon}"),
        (lat, lon) => {
            issues.extend(lat.err());
            issues.extend(lon.err());
            UNAVAILABLE.to_string()
        }
    };

    let temporal = normalize_timestamp(tags.capture_timestamp.as_deref());
    let capture_date = unwrap_field(temporal.date, &mut issues);
    let capture_time = unwrap_field(temporal.time, &mut issues);
    // The ISO issue duplicates whichever half already failed; only a
    // composite-parse failure adds new information.
    let iso_timestamp = match temporal.iso {
        Ok(value) => value,
        Err(issue) => {
            if !issues.contains(&issue) {
                issues.push(issue);
            }
            UNAVAILABLE.to_string()
        }
    };

    let record = NormalizedRecord {
        individual_id,
        coordinates,
        capture_date,
        capture_time,
        iso_timestamp,
    };
    (record, issues)
}

fn unwrap_field(result: Result<String, FieldIssue>, issues: &mut Vec<FieldIssue>) -> String {
    match result {
        Ok(value) => value,
        Err(issue) => {
            issues.push(issue);
            UNAVAILABLE.to_string()
        }
    }
}

/// Orders a fully assembled batch by individual identifier, ascending.
///
/// The sort is stable: unknown-identifier records (sentinel 0) come first
/// among all rows, and ties keep their original input order. Oversized
/// identifiers saturate to `u64::MAX` during extraction and therefore land
/// last.
pub fn sort_by_individual(records: &mut [NormalizedRecord]) {
    records.sort_by_key(|record| record.individual_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::IssueKind;
    use crate::tags::RawDms;

    fn full_tags() -> RawImageTags {
        RawImageTags {
            description: Some("Individuo 7".into()),
            capture_timestamp: Some("2023:04:05 10:20:30".into()),
            latitude: Some(RawDms::new("-23", "30", "15/1")),
            longitude: Some(RawDms::new("-46/1", "38", "4020/100")),
        }
    }

    #[test]
    fn full_tag_set_assembles_without_issues() {
        let (record, issues) = assemble(&full_tags());
        assert!(issues.is_empty());
        assert_eq!(record.individual_id, 7);
        assert_eq!(record.coordinates, "S23°30'15.00000\"; W46°38'40.20000\"");
        assert_eq!(record.capture_date, "05-04-2023");
        assert_eq!(record.capture_time, "10:20:30");
        assert_eq!(record.iso_timestamp, "2023-04-05T10:20:30");
    }

    #[test]
    fn empty_tag_set_assembles_all_sentinels() {
        let (record, issues) = assemble(&RawImageTags::default());
        assert_eq!(record.individual_id, 0);
        assert_eq!(record.coordinates, UNAVAILABLE);
        assert_eq!(record.capture_date, UNAVAILABLE);
        assert_eq!(record.capture_time, UNAVAILABLE);
        assert_eq!(record.iso_timestamp, UNAVAILABLE);
        assert!(!issues.is_empty());
    }

    #[test]
    fn one_failed_axis_blanks_the_combined_coordinates() {
        let mut tags = full_tags();
        tags.longitude = None;
        let (record, issues) = assemble(&tags);
        assert_eq!(record.coordinates, UNAVAILABLE);
        assert!(issues
            .iter()
            .any(|issue| issue.kind == IssueKind::ExtractionMissing));
    }

    #[test]
    fn date_survives_a_mangled_time() {
        let mut tags = full_tags();
        tags.capture_timestamp = Some("2023:04:05 99:99:99".into());
        let (record, issues) = assemble(&tags);
        assert_eq!(record.capture_date, "05-04-2023");
        assert_eq!(record.capture_time, UNAVAILABLE);
        assert_eq!(record.iso_timestamp, UNAVAILABLE);
        // The shared time/iso failure is reported once.
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn sort_is_ascending_with_unknowns_first() {
        let ids = [5u64, 0, 12, 2];
        let mut records: Vec<NormalizedRecord> = ids
            .iter()
            .map(|id| {
                let (mut record, _) = assemble(&RawImageTags::default());
                record.individual_id = *id;
                record
            })
            .collect();

        sort_by_individual(&mut records);
        let sorted: Vec<u64> = records.iter().map(|r| r.individual_id).collect();
        assert_eq!(sorted, vec![0, 2, 5, 12]);
    }

    #[test]
    fn tied_identifiers_keep_input_order() {
        let (mut first, _) = assemble(&RawImageTags {
            description: None,
            capture_timestamp: Some("2023:01:01 00:00:01".into()),
            ..Default::default()
        });
        let (mut second, _) = assemble(&RawImageTags {
            description: None,
            capture_timestamp: Some("2023:01:01 00:00:02".into()),
            ..Default::default()
        });
        first.individual_id = 0;
        second.individual_id = 0;

        let mut records = vec![first.clone(), second.clone()];
        sort_by_individual(&mut records);
        assert_eq!(records, vec![first, second]);
    }
}
