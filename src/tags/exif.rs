//! EXIF extraction collaborator.
//!
//! Reads the four tags the pipeline consumes (`ImageDescription`,
//! `DateTimeOriginal`/`DateTime`, `GPSLatitude`, `GPSLongitude`) from an
//! image file and packs them into a [`RawImageTags`]. Anything else in the
//! EXIF payload is ignored; this is deliberately not a general EXIF parser.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{RawDms, RawImageTags};
use crate::error::GeorowError;

/// Reads the raw tag set from one image file.
///
/// A file that cannot be opened or carries no EXIF container at all is an
/// extraction failure; individual missing tags are not. The caller decides
/// whether a failed file is skipped or fails the batch.
pub fn read_image_tags(path: &Path) -> Result<RawImageTags, GeorowError> {
    let file = File::open(path).map_err(GeorowError::Io)?;
    let mut reader = BufReader::new(file);

    let exif = exif::Reader::new()
        .read_from_container(&mut reader)
        .map_err(|source| GeorowError::ExifRead {
            path: path.to_path_buf(),
            source,
        })?;

    let description = exif
        .get_field(exif::Tag::ImageDescription, exif::In::PRIMARY)
        .and_then(|field| clean_text(&field.display_value().to_string()));

    // Prefer the original capture time; fall back to the file modification
    // timestamp some cameras write instead.
    let capture_timestamp = exif
        .get_field(exif::Tag::DateTimeOriginal, exif::In::PRIMARY)
        .or_else(|| exif.get_field(exif::Tag::DateTime, exif::In::PRIMARY))
        .and_then(|field| clean_text(&field.display_value().to_string()));

    let latitude = gps_triple(
        &exif,
        exif::Tag::GPSLatitude,
        exif::Tag::GPSLatitudeRef,
        'S',
    );
    let longitude = gps_triple(
        &exif,
        exif::Tag::GPSLongitude,
        exif::Tag::GPSLongitudeRef,
        'W',
    );

    Ok(RawImageTags {
        description,
        capture_timestamp,
        latitude,
        longitude,
    })
}

/// Strips the quoting kamadak-exif puts around ASCII values and drops
/// whitespace-only results.
fn clean_text(raw: &str) -> Option<String> {
    let text = raw.trim_matches('"').trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Extracts one GPS axis as a raw `"num/denom"` triple.
///
/// EXIF stores GPS rationals unsigned and keeps the hemisphere in a separate
/// reference tag. The pipeline contract wants sign-bearing degrees instead,
/// so a southern/western reference is folded into the degrees sign here.
fn gps_triple(
    exif: &exif::Exif,
    value_tag: exif::Tag,
    ref_tag: exif::Tag,
    negative_ref: char,
) -> Option<RawDms> {
    let field = exif.get_field(value_tag, exif::In::PRIMARY)?;
    let rationals = match &field.value {
        exif::Value::Rational(rationals) if rationals.len() >= 3 => rationals,
        _ => return None,
    };

    let is_negative = exif
        .get_field(ref_tag, exif::In::PRIMARY)
        .map(|field| field.display_value().to_string().contains(negative_ref))
        .unwrap_or(false);

    let degrees = if is_negative {
        format!("-{}/{}", rationals[0].num, rationals[0].denom)
    } else {
        format!("{}/{}", rationals[0].num, rationals[0].denom)
    };

    Some(RawDms::new(
        degrees,
        format!("{}/{}", rationals[1].num, rationals[1].denom),
        format!("{}/{}", rationals[2].num, rationals[2].denom),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn clean_text_strips_quotes_and_whitespace() {
        assert_eq!(clean_text("\"Individuo 7\""), Some("Individuo 7".into()));
        assert_eq!(clean_text("  plain  "), Some("plain".into()));
        assert_eq!(clean_text("\"\""), None);
        assert_eq!(clean_text("   "), None);
    }

    #[test]
    fn file_without_exif_container_is_an_extraction_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not an image").unwrap();

        let result = read_image_tags(file.path());
        assert!(matches!(result, Err(GeorowError::ExifRead { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = read_image_tags(Path::new("does-not-exist.jpg"));
        assert!(matches!(result, Err(GeorowError::Io(_))));
    }
}
