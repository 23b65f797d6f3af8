//! Report export: the fixed row schema and its CSV/JSON writers.
//!
//! The column order `individual_id, coordinates, capture_date,
//! capture_time, iso_timestamp` is the contract downstream report tooling
//! relies on; it is fixed by the field order of [`ReportRow`] and must not
//! change. Writers take the already-ordered records from the pipeline and
//! never reorder or drop rows.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GeorowError;
use crate::record::NormalizedRecord;

/// One flat row of the exported report.
///
/// Field order defines the column order of the CSV output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub individual_id: u64,
    pub coordinates: String,
    pub capture_date: String,
    pub capture_time: String,
    pub iso_timestamp: String,
}

impl From<&NormalizedRecord> for ReportRow {
    fn from(record: &NormalizedRecord) -> Self {
        Self {
            individual_id: record.individual_id,
            coordinates: record.coordinates.clone(),
            capture_date: record.capture_date.clone(),
            capture_time: record.capture_time.clone(),
            iso_timestamp: record.iso_timestamp.clone(),
        }
    }
}

/// Writes the ordered records to a CSV file with a header row.
pub fn write_csv(path: &Path, records: &[NormalizedRecord]) -> Result<(), GeorowError> {
    let file = File::create(path).map_err(GeorowError::Io)?;
    let writer = BufWriter::new(file);

    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(ReportRow::from(record))
            .map_err(|source| GeorowError::CsvWrite {
                path: path.to_path_buf(),
                source,
            })?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| GeorowError::Io(e.into_error()))?
        .flush()
        .map_err(GeorowError::Io)?;

    Ok(())
}

/// Renders the ordered records as a CSV string.
///
/// Useful for testing without file I/O.
pub fn to_csv_string(records: &[NormalizedRecord]) -> Result<String, GeorowError> {
    let dummy_path = Path::new("<string>");
    let mut csv_writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        csv_writer
            .serialize(ReportRow::from(record))
            .map_err(|source| GeorowError::CsvWrite {
                path: dummy_path.to_path_buf(),
                source,
            })?;
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| GeorowError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| GeorowError::Io(std::io::Error::other(e)))
}

/// Writes the ordered records to a pretty-printed JSON array.
pub fn write_json(path: &Path, records: &[NormalizedRecord]) -> Result<(), GeorowError> {
    let file = File::create(path).map_err(GeorowError::Io)?;
    let mut writer = BufWriter::new(file);

    let rows: Vec<ReportRow> = records.iter().map(ReportRow::from).collect();
    serde_json::to_writer_pretty(&mut writer, &rows).map_err(|source| GeorowError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(GeorowError::Io)?;
    writer.flush().map_err(GeorowError::Io)?;

    Ok(())
}

/// Renders the ordered records as a pretty-printed JSON string.
pub fn to_json_string(records: &[NormalizedRecord]) -> Result<String, GeorowError> {
    let rows: Vec<ReportRow> = records.iter().map(ReportRow::from).collect();
    serde_json::to_string_pretty(&rows).map_err(|source| GeorowError::JsonWrite {
        path: Path::new("<string>").to_path_buf(),
        source,
    })
}
