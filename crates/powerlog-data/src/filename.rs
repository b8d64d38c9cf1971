//! Raw-export filename recognition and standardized output naming.
//!
//! Raw files are named `HOST__YYYY-MM-DD_HH-MM-SS__<TOOL>.<ext>`, e.g.
//! `DESKTOP-FP4OP26__2022-07-30_13-35-55__IPG.csv`. The embedded timestamp is
//! the moment the recording session was started and becomes the anchor for
//! date reconstruction.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use powerlog_core::error::{Result, StandardizeError};
use powerlog_core::models::{Anchor, TimestampWindow};
use powerlog_core::schema::{self, SourceTool};

/// The structured fields of a raw export file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameParts {
    /// Machine name the export was recorded on.
    pub host: String,
    /// Session start date string, `YYYY-MM-DD`.
    pub date: String,
    /// Session start time string, `HH-MM-SS`.
    pub time: String,
    /// The tool that produced the export.
    pub source: SourceTool,
    /// File extension without the leading dot.
    pub extension: String,
}

impl FilenameParts {
    /// Resolve the session anchor from the embedded date and time strings.
    pub fn anchor(&self) -> Result<Anchor> {
        Anchor::from_parts(&self.date, &self.time)
    }
}

fn filename_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // HOST __ DATE _ TIME __ TOOL, applied to the stem only.
        Regex::new(r"^(?P<host>\w[\w.-]*)__(?P<date>\d{4}-\d{2}-\d{2})_(?P<time>\d{2}-\d{2}-\d{2})__(?P<tool>\w+)$")
            .expect("filename regex is valid")
    })
}

/// Parse a raw export file name into its structured parts.
///
/// Fails with [`StandardizeError::UnrecognizedFilename`] when the name does
/// not follow the convention or names an unknown tool; no field is ever
/// defaulted. Note this does not validate the embedded timestamp values —
/// that happens in [`FilenameParts::anchor`].
pub fn parse_filename(name: &str) -> Result<FilenameParts> {
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| StandardizeError::UnrecognizedFilename(name.to_string()))?;
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let captures = filename_regex()
        .captures(stem)
        .ok_or_else(|| StandardizeError::UnrecognizedFilename(name.to_string()))?;

    let source = SourceTool::from_suffix(&captures["tool"])
        .ok_or_else(|| StandardizeError::UnrecognizedFilename(name.to_string()))?;

    Ok(FilenameParts {
        host: captures["host"].to_string(),
        date: captures["date"].to_string(),
        time: captures["time"].to_string(),
        source,
        extension,
    })
}

/// Build the standardized output file name for one processed export.
///
/// Layout: `HOST__<start>__<end>__STD_<TOOL>.csv`, with both window
/// timestamps rendered as `YYYY-MM-DD_HH-MM-SS` so the name stays
/// filesystem-safe.
pub fn standardized_name(parts: &FilenameParts, window: &TimestampWindow) -> String {
    let fmt = format!("{}_{}", schema::DATE_FORMAT, schema::FILENAME_TIME_FORMAT);
    format!(
        "{host}{d}{start}{d}{end}{d}STD_{tool}.csv",
        host = parts.host,
        d = schema::FILENAME_DELIM,
        start = window.start.format(&fmt),
        end = window.end.format(&fmt),
        tool = parts.source.suffix(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use powerlog_core::models::observation_window;

    // ── parse_filename ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_filename_power_gadget() {
        let parts = parse_filename("DESKTOP-FP4OP26__2022-07-30_13-35-55__IPG.csv").unwrap();
        assert_eq!(parts.host, "DESKTOP-FP4OP26");
        assert_eq!(parts.date, "2022-07-30");
        assert_eq!(parts.time, "13-35-55");
        assert_eq!(parts.source, SourceTool::PowerGadget);
        assert_eq!(parts.extension, "csv");
    }

    #[test]
    fn test_parse_filename_stats_script() {
        let parts = parse_filename("laptop01__2022-08-02_09-15-00__Script2.csv").unwrap();
        assert_eq!(parts.source, SourceTool::StatsScript);
        assert_eq!(parts.host, "laptop01");
    }

    #[test]
    fn test_parse_filename_unknown_tool() {
        let err = parse_filename("HOST__2022-07-30_13-35-55__RM.csv").unwrap_err();
        assert!(matches!(err, StandardizeError::UnrecognizedFilename(_)));
    }

    #[test]
    fn test_parse_filename_wrong_shapes() {
        for bad in [
            "notes.txt",
            "HOST_2022-07-30_13-35-55_IPG.csv",      // single underscores
            "HOST__2022-07-30__IPG.csv",             // missing time
            "HOST__30-07-2022_13-35-55__IPG.csv",    // non-ISO date
            "__2022-07-30_13-35-55__IPG.csv",        // empty host
        ] {
            assert!(
                matches!(
                    parse_filename(bad),
                    Err(StandardizeError::UnrecognizedFilename(_))
                ),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_filename_does_not_validate_timestamp_values() {
        // Shape-valid but semantically impossible values pass here and are
        // rejected later by the anchor resolver.
        let parts = parse_filename("HOST__2022-07-30_25-61-61__IPG.csv").unwrap();
        let err = parts.anchor().unwrap_err();
        assert!(matches!(err, StandardizeError::MalformedInput(_)));
    }

    #[test]
    fn test_parts_anchor_resolution() {
        let parts = parse_filename("HOST__2022-07-30_13-35-55__IPG.csv").unwrap();
        let anchor = parts.anchor().unwrap();
        assert_eq!(anchor.date(), NaiveDate::from_ymd_opt(2022, 7, 30).unwrap());
    }

    // ── standardized_name ─────────────────────────────────────────────────────

    #[test]
    fn test_standardized_name_layout() {
        let parts = parse_filename("DESKTOP-FP4OP26__2022-07-30_23-59-50__IPG.csv").unwrap();
        let aligned = vec![
            NaiveDate::from_ymd_opt(2022, 7, 31)
                .unwrap()
                .and_hms_opt(0, 0, 5)
                .unwrap(),
            NaiveDate::from_ymd_opt(2022, 7, 31)
                .unwrap()
                .and_hms_opt(0, 10, 0)
                .unwrap(),
        ];
        let window = observation_window(&aligned).unwrap();
        assert_eq!(
            standardized_name(&parts, &window),
            "DESKTOP-FP4OP26__2022-07-31_00-00-05__2022-07-31_00-10-00__STD_IPG.csv"
        );
    }
}
