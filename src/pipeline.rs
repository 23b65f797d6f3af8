//! Batch processing: raw tag sets in, ordered records plus a report out.
//!
//! The pipeline is atomic from the caller's perspective: either the whole
//! batch normalizes into a complete, ordered table, or a single batch-level
//! [`GeorowError`] comes back and no partial table is exposed. Per-image
//! problems never fail the batch; they are folded into sentinels and listed
//! in the [`BatchReport`].

use std::fmt;

use rayon::prelude::*;

use crate::error::GeorowError;
use crate::normalize::FieldIssue;
use crate::record::{assemble, sort_by_individual, NormalizedRecord};
use crate::tags::RawImageTags;

/// Options for batch processing behavior.
///
/// Passed in at the call site; the pipeline keeps no process-wide state.
#[derive(Clone, Debug, Default)]
pub struct PipelineOptions {
    /// If true, normalize images on rayon's worker pool. Output is
    /// identical either way; normalization is pure per image and the
    /// orderer re-establishes a deterministic order afterwards.
    pub parallel: bool,
}

/// The result of processing one batch: the ordered table and its report.
#[derive(Clone, Debug)]
pub struct BatchOutput {
    /// One record per input image, sorted by individual identifier.
    pub records: Vec<NormalizedRecord>,

    /// Every per-field condition that was resolved to a sentinel.
    pub report: BatchReport,
}

/// All per-field issues found while normalizing a batch.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    /// Issues in input order, each attributed to its image.
    pub issues: Vec<BatchIssue>,
}

impl BatchReport {
    /// Returns true if every field of every record normalized cleanly.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the number of distinct images that had at least one issue.
    pub fn affected_images(&self) -> usize {
        let mut indices: Vec<usize> = self.issues.iter().map(|issue| issue.image_index).collect();
        indices.sort_unstable();
        indices.dedup();
        indices.len()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Normalization clean: every field derived");
        }

        writeln!(
            f,
            "Normalization used sentinels for {} field(s) across {} image(s):",
            self.issues.len(),
            self.affected_images()
        )?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

/// One per-field issue, attributed to the image it occurred in.
#[derive(Clone, Debug)]
pub struct BatchIssue {
    /// Zero-based position of the image in the input batch.
    pub image_index: usize,

    /// The underlying field issue.
    pub issue: FieldIssue,
}

impl fmt::Display for BatchIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image {}: {}", self.image_index, self.issue)
    }
}

/// Processes one batch of raw tag sets into the final ordered table.
///
/// Normalization runs per image (optionally in parallel), assembly keeps
/// the one-to-one input/output correspondence, and the orderer sorts the
/// complete table by individual identifier with stable ties. An empty
/// batch is the only condition that fails here.
pub fn process_batch(
    batch: &[RawImageTags],
    options: &PipelineOptions,
) -> Result<BatchOutput, GeorowError> {
    if batch.is_empty() {
        return Err(GeorowError::EmptyBatch);
    }

    // Indexed collection preserves input order in both modes, so issue
    // attribution and the orderer's tie-break see the same sequence.
    let assembled: Vec<(NormalizedRecord, Vec<FieldIssue>)> = if options.parallel {
        batch.par_iter().map(assemble).collect()
    } else {
        batch.iter().map(assemble).collect()
    };

    let mut records = Vec::with_capacity(assembled.len());
    let mut report = BatchReport::default();
    for (image_index, (record, issues)) in assembled.into_iter().enumerate() {
        records.push(record);
        report.issues.extend(
            issues
                .into_iter()
                .map(|issue| BatchIssue { image_index, issue }),
        );
    }

    sort_by_individual(&mut records);

    Ok(BatchOutput { records, report })
}
