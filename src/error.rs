use std::path::PathBuf;
use thiserror::Error;

/// The main error type for georow operations.
///
/// Only whole-batch conditions live here. Per-field problems (a missing tag,
/// a malformed fraction, a timestamp that will not parse) are resolved to
/// sentinel values inside the normalizers and surface through
/// [`BatchReport`](crate::pipeline::BatchReport) instead.
#[derive(Debug, Error)]
pub enum GeorowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read EXIF metadata from {path}: {source}")]
    ExifRead {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },

    #[error("The batch contains no images")]
    EmptyBatch,

    #[error("None of the {total} image file(s) contained readable metadata")]
    NoValidImages { total: usize },

    #[error("Failed to write CSV report to {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write JSON report to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
