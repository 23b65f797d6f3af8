//! Raw, pre-normalization tag model.
//!
//! This module defines the shape of the data the extraction collaborator
//! hands to the pipeline: one [`RawImageTags`] per photograph, every field
//! optional. Values are kept as the loosely formatted strings found in EXIF
//! payloads (`"n/d"` rationals, colon-delimited timestamps, free text); the
//! [`normalize`](crate::normalize) module turns them into clean row fields.

pub mod exif;

/// A raw degrees/minutes/seconds triple for one coordinate axis.
///
/// Each component is either a decimal literal (`"23"`, `"15.5"`) or a
/// rational fraction (`"15/1"`, `"3080/100"`). The degrees component may
/// carry a sign; the hemisphere is derived from it during normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDms {
    pub degrees: String,
    pub minutes: String,
    pub seconds: String,
}

impl RawDms {
    /// Creates a triple from the three component strings.
    pub fn new(
        degrees: impl Into<String>,
        minutes: impl Into<String>,
        seconds: impl Into<String>,
    ) -> Self {
        Self {
            degrees: degrees.into(),
            minutes: minutes.into(),
            seconds: seconds.into(),
        }
    }
}

/// The raw tag set extracted from one photograph.
///
/// Every field is optional: a missing tag is normal input, never an error.
/// The struct is ephemeral, it exists only until the pipeline has assembled
/// the corresponding [`NormalizedRecord`](crate::record::NormalizedRecord).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawImageTags {
    /// Free-text image description; may embed the individual's number.
    pub description: Option<String>,

    /// Capture timestamp in the canonical EXIF form `"YYYY:MM:DD HH:MM:SS"`.
    pub capture_timestamp: Option<String>,

    /// Raw latitude triple with sign-bearing degrees.
    pub latitude: Option<RawDms>,

    /// Raw longitude triple with sign-bearing degrees.
    pub longitude: Option<RawDms>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tags_are_all_absent() {
        let tags = RawImageTags::default();
        assert!(tags.description.is_none());
        assert!(tags.capture_timestamp.is_none());
        assert!(tags.latitude.is_none());
        assert!(tags.longitude.is_none());
    }

    #[test]
    fn raw_dms_accepts_mixed_component_styles() {
        let dms = RawDms::new("-23", "30", "15/1");
        assert_eq!(dms.degrees, "-23");
        assert_eq!(dms.seconds, "15/1");
    }
}
