//! Normalizers for the raw EXIF-style tag values.
//!
//! Each submodule turns one loosely formatted input into a clean row field:
//!
//! - [`coordinate`]: rational DMS triples into signed, formatted DMS strings
//! - [`temporal`]: colon-delimited timestamps into date/time/ISO fields
//! - [`identifier`]: free-text descriptions into numeric individual IDs
//!
//! # Design Principles
//!
//! 1. **Always return a field**: a normalizer never panics and never aborts
//!    the record. Whatever cannot be derived becomes a sentinel value, with
//!    a [`FieldIssue`] describing what went wrong.
//!
//! 2. **Purity**: every normalizer is a pure function of one image's raw
//!    tags, so distinct images can be normalized on independent workers.

pub mod coordinate;
pub mod identifier;
pub mod temporal;

pub use coordinate::{normalize_axis, Axis};
pub use identifier::normalize_identifier;
pub use temporal::{normalize_timestamp, TemporalFields};

use std::fmt;

/// The kind of per-field condition a normalizer resolved to a sentinel.
///
/// All of these are non-fatal: the record is retained with the affected
/// field set to its sentinel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// An expected tag was absent from the raw tag set.
    ExtractionMissing,
    /// A coordinate triple or fraction could not be parsed.
    MalformedCoordinate,
    /// A date or time segment could not be parsed.
    MalformedTimestamp,
    /// The description contained no digits to extract an identifier from.
    MalformedIdentifier,
}

/// The raw tag a [`FieldIssue`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagField {
    Description,
    CaptureTimestamp,
    Latitude,
    Longitude,
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagField::Description => write!(f, "description"),
            TagField::CaptureTimestamp => write!(f, "capture timestamp"),
            TagField::Latitude => write!(f, "latitude"),
            TagField::Longitude => write!(f, "longitude"),
        }
    }
}

/// A single per-field normalization issue.
///
/// Issues are informational: by the time one is reported the affected field
/// has already been filled with its sentinel and the record kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldIssue {
    /// What kind of condition occurred.
    pub kind: IssueKind,

    /// Which raw tag it occurred on.
    pub field: TagField,

    /// A human-readable description of the condition.
    pub message: String,
}

impl FieldIssue {
    /// Creates a new issue.
    pub fn new(kind: IssueKind, field: TagField, message: impl Into<String>) -> Self {
        Self {
            kind,
            field,
            message: message.into(),
        }
    }

    /// Creates an issue for a tag absent from the raw set.
    pub fn missing(field: TagField) -> Self {
        Self::new(IssueKind::ExtractionMissing, field, "tag not present")
    }

    /// Creates an issue for an unparsable coordinate component.
    pub fn malformed_coordinate(field: TagField, message: impl Into<String>) -> Self {
        Self::new(IssueKind::MalformedCoordinate, field, message)
    }

    /// Creates an issue for an unparsable date or time segment.
    pub fn malformed_timestamp(message: impl Into<String>) -> Self {
        Self::new(
            IssueKind::MalformedTimestamp,
            TagField::CaptureTimestamp,
            message,
        )
    }

    /// Creates an issue for a description without any digit run.
    pub fn malformed_identifier(message: impl Into<String>) -> Self {
        Self::new(IssueKind::MalformedIdentifier, TagField::Description, message)
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} in {}: {}", self.kind, self.field, self.message)
    }
}
