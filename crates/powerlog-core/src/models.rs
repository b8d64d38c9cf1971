use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{Result, StandardizeError};
use crate::schema;

// ── Anchor ────────────────────────────────────────────────────────────────────

/// The (date, time-of-day) pair recovered from a raw export's file name.
///
/// This is the reference point for date reconstruction: the source tools
/// record a time-of-day per row but no calendar date, so the session's start
/// date is known solely from the name of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    date: NaiveDate,
    time: NaiveTime,
}

impl Anchor {
    /// Build an anchor from already-parsed components.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Parse an anchor from the filename-derived strings.
    ///
    /// `date_str` must be an ISO calendar date (`YYYY-MM-DD`) and `time_str`
    /// the filesystem-safe `HH-MM-SS` layout used inside file names. Fails
    /// with [`StandardizeError::MalformedInput`] on anything else; fields are
    /// never defaulted.
    pub fn from_parts(date_str: &str, time_str: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date_str, schema::DATE_FORMAT).map_err(|_| {
            StandardizeError::MalformedInput(format!("invalid anchor date {:?}", date_str))
        })?;
        let time =
            NaiveTime::parse_from_str(time_str, schema::FILENAME_TIME_FORMAT).map_err(|_| {
                StandardizeError::MalformedInput(format!("invalid anchor time {:?}", time_str))
            })?;
        Ok(Self { date, time })
    }

    /// Calendar date the recording session was started on.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Time-of-day the recording session was started at.
    pub fn time(&self) -> NaiveTime {
        self.time
    }
}

// ── TimestampWindow ───────────────────────────────────────────────────────────

/// Start and end timestamps of one standardized table.
///
/// A view over an aligned sequence, created on demand by
/// [`observation_window`]; never persisted independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimestampWindow {
    /// Timestamp of the first row.
    pub start: NaiveDateTime,
    /// Timestamp of the last row.
    pub end: NaiveDateTime,
}

impl TimestampWindow {
    /// Start date as `YYYY-MM-DD`.
    pub fn start_date(&self) -> String {
        self.start.format(schema::DATE_FORMAT).to_string()
    }

    /// Start time-of-day, fractional seconds only when present.
    pub fn start_time(&self) -> String {
        self.start.format(schema::TIME_FORMAT).to_string()
    }

    /// End date as `YYYY-MM-DD`.
    pub fn end_date(&self) -> String {
        self.end.format(schema::DATE_FORMAT).to_string()
    }

    /// End time-of-day, fractional seconds only when present.
    pub fn end_time(&self) -> String {
        self.end.format(schema::TIME_FORMAT).to_string()
    }

    /// Combined start rendering, single-space separated.
    pub fn start_datetime(&self) -> String {
        self.start.format(schema::DATETIME_FORMAT).to_string()
    }

    /// Combined end rendering, single-space separated.
    pub fn end_datetime(&self) -> String {
        self.end.format(schema::DATETIME_FORMAT).to_string()
    }
}

/// Derive the [`TimestampWindow`] of an aligned sequence.
///
/// Selects the first and last elements by position, deliberately not min/max:
/// the alignment postcondition makes the two equivalent today, but callers
/// depend on the first/last policy should that invariant ever be relaxed.
///
/// Fails with [`StandardizeError::MalformedInput`] on an empty sequence.
pub fn observation_window(aligned: &[NaiveDateTime]) -> Result<TimestampWindow> {
    match (aligned.first(), aligned.last()) {
        (Some(&start), Some(&end)) => Ok(TimestampWindow { start, end }),
        _ => Err(StandardizeError::MalformedInput(
            "cannot derive a window from an empty sequence".to_string(),
        )),
    }
}
