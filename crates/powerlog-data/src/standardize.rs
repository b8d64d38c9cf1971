//! The per-file and per-directory standardization pipeline.
//!
//! filename → anchor → raw table → date-rollover alignment → window →
//! standardized CSV + JSON summary. Each file is all-or-nothing; a batch
//! skips failed files and reports them, since a malformed export fails the
//! same way on every run and only fixing the file or its name can help.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use powerlog_core::align::align_time_strings;
use powerlog_core::error::{Result, StandardizeError};
use powerlog_core::models::{observation_window, TimestampWindow};
use powerlog_core::schema::SourceTool;

use crate::filename::{parse_filename, standardized_name};
use crate::reader::{find_raw_files, read_raw_table};
use crate::writer::{write_standard_csv, write_summary_json};

// ── Summaries ─────────────────────────────────────────────────────────────────

/// Outcome of standardizing a single raw export.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    /// Name of the raw input file.
    pub source_file: String,
    /// Name of the standardized CSV written for it.
    pub standardized_file: String,
    /// Machine name from the input file name.
    pub host: String,
    /// Tool that produced the export.
    pub source: SourceTool,
    /// Number of measurement rows.
    pub rows: usize,
    /// First-row date, `YYYY-MM-DD`.
    pub start_date: String,
    /// First-row time-of-day.
    pub start_time: String,
    /// Last-row date, `YYYY-MM-DD`.
    pub end_date: String,
    /// Last-row time-of-day.
    pub end_time: String,
}

impl FileSummary {
    fn new(
        source_file: &str,
        standardized_file: String,
        host: String,
        source: SourceTool,
        rows: usize,
        window: &TimestampWindow,
    ) -> Self {
        Self {
            source_file: source_file.to_string(),
            standardized_file,
            host,
            source,
            rows,
            start_date: window.start_date(),
            start_time: window.start_time(),
            end_date: window.end_date(),
            end_time: window.end_time(),
        }
    }
}

/// Outcome of standardizing a whole directory.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Summaries of the files that were standardized.
    pub summaries: Vec<FileSummary>,
    /// Inputs that failed and were skipped, with their errors.
    pub skipped: Vec<(PathBuf, StandardizeError)>,
}

impl BatchSummary {
    /// Number of successfully standardized files.
    pub fn processed(&self) -> usize {
        self.summaries.len()
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Standardize one raw export into `outdir`.
///
/// Writes the standardized CSV plus a sibling `.json` summary record and
/// returns the summary. Fails without writing anything when the name, the
/// anchor, or any measurement row is malformed.
pub fn standardize_file(path: &Path, outdir: &Path) -> Result<FileSummary> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StandardizeError::UnrecognizedFilename(path.display().to_string()))?;

    let parts = parse_filename(name)?;
    let anchor = parts.anchor()?;
    let table = read_raw_table(path, parts.source)?;
    let aligned = align_time_strings(&anchor, &table.time_strings())?;
    let window = observation_window(&aligned)?;

    let std_name = standardized_name(&parts, &window);
    std::fs::create_dir_all(outdir)?;
    let csv_path = outdir.join(&std_name);
    write_standard_csv(&csv_path, &table, &aligned)?;

    let summary = FileSummary::new(name, std_name, parts.host, parts.source, table.rows.len(), &window);
    write_summary_json(&csv_path.with_extension("json"), &summary)?;

    info!(
        "Standardized {} ({} rows, {} {} .. {} {})",
        name, summary.rows, summary.start_date, summary.start_time, summary.end_date, summary.end_time
    );
    Ok(summary)
}

/// Standardize every raw export found under `indir` into `outdir`.
///
/// Failed files are logged and collected in the batch summary rather than
/// aborting the run. Fails with [`StandardizeError::NoInputFiles`] when
/// nothing under `indir` matches the naming convention (and the optional
/// `source` filter).
pub fn standardize_dir(
    indir: &Path,
    outdir: &Path,
    source: Option<SourceTool>,
) -> Result<BatchSummary> {
    let files = find_raw_files(indir, source);
    if files.is_empty() {
        return Err(StandardizeError::NoInputFiles(indir.to_path_buf()));
    }

    info!("Found {} raw export(s) under {}", files.len(), indir.display());

    let mut batch = BatchSummary::default();
    for file in files {
        match standardize_file(&file, outdir) {
            Ok(summary) => batch.summaries.push(summary),
            Err(err) => {
                warn!("Skipping {}: {}", file.display(), err);
                batch.skipped.push((file, err));
            }
        }
    }

    info!(
        "Batch done: {} standardized, {} skipped",
        batch.processed(),
        batch.skipped.len()
    );
    Ok(batch)
}
