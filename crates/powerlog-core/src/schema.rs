//! Common output schema shared by all standardized tables.
//!
//! Both source tools are normalized onto the same three leading columns and
//! the same date/time renderings, so downstream consumers never need to know
//! which tool produced a table.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Standard column names ─────────────────────────────────────────────────────

/// Combined date-and-time column, `YYYY-MM-DD HH:MM:SS[.ffffff]`.
pub const RAW_DATETIME_COLUMN: &str = "Raw DateTime";
/// Calendar-date column, `YYYY-MM-DD`.
pub const RAW_DATE_COLUMN: &str = "Raw Date";
/// Time-of-day column, `HH:MM:SS[.ffffff]`.
pub const RAW_TIME_COLUMN: &str = "Raw Time";

// ── Format strings ────────────────────────────────────────────────────────────

/// ISO-8601 calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Locale-free time-of-day; fractional seconds printed only when present.
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";
/// Combined rendering with a single-space separator.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
/// Time layout used inside file names, where `:` is not filesystem-safe.
pub const FILENAME_TIME_FORMAT: &str = "%H-%M-%S";

/// Separator between the host, timestamp, and tool fields of a raw file name.
pub const FILENAME_DELIM: &str = "__";

// ── SourceTool ────────────────────────────────────────────────────────────────

/// The monitoring tool that produced a raw export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTool {
    /// The Intel power-logging utility.
    PowerGadget,
    /// The secondary system-stats script.
    StatsScript,
}

impl SourceTool {
    /// The tool identifier embedded in raw file names.
    pub fn suffix(self) -> &'static str {
        match self {
            SourceTool::PowerGadget => "IPG",
            SourceTool::StatsScript => "Script2",
        }
    }

    /// Reverse of [`suffix`](Self::suffix); `None` for unknown identifiers.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "IPG" => Some(SourceTool::PowerGadget),
            "Script2" => Some(SourceTool::StatsScript),
            _ => None,
        }
    }

    /// Header name of the tool-specific time-of-day column.
    pub fn time_column(self) -> &'static str {
        match self {
            SourceTool::PowerGadget => "System Time",
            SourceTool::StatsScript => "Time",
        }
    }
}

impl fmt::Display for SourceTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
