//! Raw export discovery and table ingestion.
//!
//! Reads the tool-emitted CSV tables into memory as strings; no value is
//! interpreted here except for locating the time-of-day column. Power-gadget
//! exports carry a free-form summary block after the measurement rows, which
//! is truncated away so every retained row has the full column set.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use powerlog_core::error::{Result, StandardizeError};
use powerlog_core::schema::SourceTool;

use crate::filename::parse_filename;

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find all raw export files recursively under `dir`, sorted by path.
///
/// A file qualifies when its name parses as a raw export name and, if
/// `source` is given, was produced by that tool. Files with unrecognised
/// names are silently ignored — raw directories routinely hold other data.
pub fn find_raw_files(dir: &Path, source: Option<SourceTool>) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Input path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            match parse_filename(&name) {
                Ok(parts) => source.map_or(true, |tool| parts.source == tool),
                Err(_) => false,
            }
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── RawTable ──────────────────────────────────────────────────────────────────

/// One raw export table, headers plus measurement rows, all as strings.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Column headers in source order.
    pub headers: Vec<String>,
    /// Measurement rows; every row has exactly `headers.len()` fields.
    pub rows: Vec<Vec<String>>,
    /// Index of the tool-specific time-of-day column.
    pub time_column: usize,
}

impl RawTable {
    /// The time-of-day strings of all rows, in acquisition order.
    pub fn time_strings(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row[self.time_column].as_str())
            .collect()
    }
}

/// Read one raw export into a [`RawTable`].
///
/// The time column is located by the tool's header name, falling back to
/// column 0 when the header is absent. Reading stops at the first record
/// whose field count differs from the header row: that is where the
/// power-gadget summary block begins.
pub fn read_raw_table(path: &Path, source: SourceTool) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|e| StandardizeError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(|f| f.trim().to_string()).collect(),
        None => {
            return Err(StandardizeError::MalformedInput(format!(
                "{} contains no header row",
                path.display()
            )))
        }
    };

    let time_column = headers
        .iter()
        .position(|h| h == source.time_column())
        .unwrap_or_else(|| {
            debug!(
                "{}: no {:?} column, falling back to column 0",
                path.display(),
                source.time_column()
            );
            0
        });

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in records {
        let record = record?;
        if record.len() != headers.len() {
            debug!(
                "{}: stopping at summary block after {} rows",
                path.display(),
                rows.len()
            );
            break;
        }
        rows.push(record.iter().map(|f| f.trim().to_string()).collect());
    }

    debug!(
        "{}: {} columns, {} measurement rows, time column {}",
        path.display(),
        headers.len(),
        rows.len(),
        time_column
    );

    Ok(RawTable {
        headers,
        rows,
        time_column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    // ── find_raw_files ────────────────────────────────────────────────────────

    #[test]
    fn test_find_raw_files_filters_by_name() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "HOST__2022-07-30_13-35-55__IPG.csv", "x\n");
        write_file(dir.path(), "HOST__2022-07-30_13-40-00__Script2.csv", "x\n");
        write_file(dir.path(), "notes.txt", "x\n");
        write_file(dir.path(), "other.csv", "x\n");

        let files = find_raw_files(dir.path(), None);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_find_raw_files_source_filter() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "HOST__2022-07-30_13-35-55__IPG.csv", "x\n");
        write_file(dir.path(), "HOST__2022-07-30_13-40-00__Script2.csv", "x\n");

        let ipg_only = find_raw_files(dir.path(), Some(SourceTool::PowerGadget));
        assert_eq!(ipg_only.len(), 1);
        assert!(ipg_only[0].to_string_lossy().contains("__IPG"));
    }

    #[test]
    fn test_find_raw_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("host-b");
        std::fs::create_dir_all(&sub).unwrap();
        write_file(&sub, "b__2022-07-30_13-35-55__IPG.csv", "x\n");
        write_file(dir.path(), "a__2022-07-30_13-35-55__IPG.csv", "x\n");

        let files = find_raw_files(dir.path(), None);
        assert_eq!(files.len(), 2);
        assert!(files[0] < files[1]);
    }

    #[test]
    fn test_find_raw_files_missing_dir() {
        let files = find_raw_files(Path::new("/tmp/does-not-exist-powerlog-test"), None);
        assert!(files.is_empty());
    }

    // ── read_raw_table ────────────────────────────────────────────────────────

    #[test]
    fn test_read_raw_table_locates_time_column() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "HOST__2022-07-30_13-35-55__IPG.csv",
            "Elapsed Time (sec),System Time,CPU Utilization(%)\n\
             1.0,13:36:01.250000,12.5\n\
             2.0,13:36:02.250000,13.0\n",
        );

        let table = read_raw_table(&path, SourceTool::PowerGadget).unwrap();
        assert_eq!(table.time_column, 1);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.time_strings(),
            vec!["13:36:01.250000", "13:36:02.250000"]
        );
    }

    #[test]
    fn test_read_raw_table_time_column_fallback() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "HOST__2022-07-30_13-35-55__Script2.csv",
            "Timestamp,Mem\n08:00:01,512\n",
        );

        let table = read_raw_table(&path, SourceTool::StatsScript).unwrap();
        assert_eq!(table.time_column, 0);
        assert_eq!(table.time_strings(), vec!["08:00:01"]);
    }

    #[test]
    fn test_read_raw_table_truncates_summary_block() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "HOST__2022-07-30_13-35-55__IPG.csv",
            "System Time,CPU Utilization(%)\n\
             13:36:01,12.5\n\
             13:36:02,13.0\n\
             \n\
             \"Total Elapsed Time (sec) = 2.000\"\n\
             \"Cumulative Package Energy_0 (Joules) = 15.2\"\n",
        );

        let table = read_raw_table(&path, SourceTool::PowerGadget).unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_read_raw_table_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "HOST__2022-07-30_13-35-55__Script2.csv",
            "Time, CPU\n08:00:01, 42\n",
        );

        let table = read_raw_table(&path, SourceTool::StatsScript).unwrap();
        assert_eq!(table.headers, vec!["Time", "CPU"]);
        assert_eq!(table.rows[0], vec!["08:00:01", "42"]);
    }

    #[test]
    fn test_read_raw_table_empty_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "HOST__2022-07-30_13-35-55__IPG.csv", "");
        let err = read_raw_table(&path, SourceTool::PowerGadget).unwrap_err();
        assert!(matches!(err, StandardizeError::MalformedInput(_)));
    }

    #[test]
    fn test_read_raw_table_missing_file() {
        let err = read_raw_table(
            Path::new("/tmp/powerlog-missing/HOST__2022-07-30_13-35-55__IPG.csv"),
            SourceTool::PowerGadget,
        )
        .unwrap_err();
        assert!(matches!(err, StandardizeError::FileRead { .. }));
    }
}
