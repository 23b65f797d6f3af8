//! Georow: geotagged photos into normalized tabular reports.
//!
//! Georow reads the EXIF metadata of a batch of photographs and produces a
//! clean, always-populated table: individual identifier, combined DMS
//! coordinate, capture date, capture time, and ISO timestamp. Raw tag
//! values are inconsistently shaped (rational fractions, colon-delimited
//! timestamps, free-text identifiers); the normalization pipeline resolves
//! them to a fixed row schema with explicit sentinels for whatever could
//! not be derived.
//!
//! # Modules
//!
//! - [`tags`]: the raw tag model and the EXIF extraction collaborator
//! - [`normalize`]: coordinate, temporal and identifier normalizers
//! - [`record`]: per-image record assembly and batch ordering
//! - [`pipeline`]: batch processing and the issue report
//! - [`export`]: the fixed row schema and CSV/JSON writers
//! - [`error`]: error types for georow operations

pub mod error;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod tags;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use walkdir::WalkDir;

pub use error::GeorowError;
pub use record::{NormalizedRecord, UNAVAILABLE};

/// File extensions the report command picks up when scanning a directory.
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "tif", "tiff", "webp", "heif"];

/// The georow CLI application.
#[derive(Parser)]
#[command(name = "georow")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Normalize a batch of geotagged photos into a tabular report.
    Report(ReportArgs),
}

/// Arguments for the report subcommand.
#[derive(clap::Args)]
struct ReportArgs {
    /// An image file, or a directory scanned recursively for images.
    input: PathBuf,

    /// Path of the report file to write.
    #[arg(long, default_value = "report.csv")]
    output: PathBuf,

    /// Output format ('csv' or 'json').
    #[arg(long, default_value = "csv")]
    format: String,

    /// Normalize images on a worker pool.
    #[arg(long)]
    parallel: bool,
}

/// Run the georow CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), GeorowError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Report(args)) => run_report(args),
        None => {
            println!("georow {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Turns geotagged photo metadata into normalized tabular reports.");
            println!();
            println!("Run 'georow --help' for usage information.");
            Ok(())
        }
    }
}

/// Supported report output formats.
enum OutputFormat {
    Csv,
    Json,
}

/// Execute the report subcommand.
fn run_report(args: ReportArgs) -> Result<(), GeorowError> {
    // Reject an unknown format before touching any files.
    let format = match args.format.as_str() {
        "csv" => OutputFormat::Csv,
        "json" => OutputFormat::Json,
        other => {
            return Err(GeorowError::UnsupportedFormat(format!(
                "'{}' (supported: csv, json)",
                other
            )));
        }
    };

    let files = collect_image_files(&args.input)?;
    if files.is_empty() {
        return Err(GeorowError::EmptyBatch);
    }

    // Extraction failures skip the file; normalization issues never reach
    // this level. Only a batch where every file failed is fatal.
    let mut batch = Vec::with_capacity(files.len());
    for path in &files {
        match tags::exif::read_image_tags(path) {
            Ok(tags) => batch.push(tags),
            Err(e) => eprintln!("skipping {}: {e}", path.display()),
        }
    }
    if batch.is_empty() {
        return Err(GeorowError::NoValidImages { total: files.len() });
    }

    let options = pipeline::PipelineOptions {
        parallel: args.parallel,
    };
    let output = pipeline::process_batch(&batch, &options)?;

    match format {
        OutputFormat::Csv => export::write_csv(&args.output, &output.records)?,
        OutputFormat::Json => export::write_json(&args.output, &output.records)?,
    }

    println!(
        "Wrote {} row(s) to {}",
        output.records.len(),
        args.output.display()
    );
    if !output.report.is_clean() {
        print!("{}", output.report);
    }

    Ok(())
}

/// Collects the image files for one report invocation.
///
/// A file argument is taken as-is; a directory is walked recursively and
/// filtered by extension. Directory results are sorted by path so batch
/// order (and therefore sort tie-breaking) does not depend on filesystem
/// iteration order.
fn collect_image_files(input: &Path) -> Result<Vec<PathBuf>, GeorowError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input) {
        let entry = entry.map_err(|e| GeorowError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_image = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false);
        if is_image {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
