//! Date-rollover alignment.
//!
//! The source tools emit a time-of-day per measurement row and nothing else;
//! the only calendar information is the anchor recovered from the file name.
//! This module reconstructs a full timestamp for every row, inferring midnight
//! rollovers from the row order alone. Row order is acquisition order and is
//! never re-sorted.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use tracing::{debug, warn};

use crate::error::{Result, StandardizeError};
use crate::models::Anchor;

/// Gap between anchor and first sample above which a first-row rollover is
/// reported as a probable mis-named file.
const SUSPICIOUS_FIRST_GAP_HOURS: i64 = 6;

/// Parse a tool-emitted time-of-day string.
///
/// Accepts `HH:MM:SS` and `HH:MM:SS.ffffff` (fractional part up to
/// microseconds, as written by the power-gadget exports).
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    const FMTS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S"];
    let trimmed = s.trim();
    for fmt in FMTS {
        if let Ok(t) = NaiveTime::parse_from_str(trimmed, fmt) {
            return Ok(t);
        }
    }
    Err(StandardizeError::MalformedInput(format!(
        "invalid time-of-day {:?}",
        s
    )))
}

/// Reconstruct a full timestamp for every entry of a time-of-day sequence.
///
/// The first row's date is the anchor date, advanced by one day when the
/// first time-of-day is strictly before the anchor time (the session crossed
/// midnight before the first sample landed). Every later row advances the
/// carried date by one day when its time-of-day is strictly before the
/// previous row's. Equal consecutive times are same-day, and a first time
/// equal to the anchor time is same-day: both comparisons are strict `<`.
///
/// The result is monotonically non-decreasing as full timestamps, provided
/// consecutive samples are never more than one rollover apart — guaranteed by
/// the tools' polling rate, not checked here.
///
/// Fails with [`StandardizeError::MalformedInput`] when `times` is empty.
pub fn align_timestamps(anchor: &Anchor, times: &[NaiveTime]) -> Result<Vec<NaiveDateTime>> {
    let first = *times.first().ok_or_else(|| {
        StandardizeError::MalformedInput("empty time-of-day sequence".to_string())
    })?;

    let start_date = if first < anchor.time() {
        let advanced = anchor.date().succ_opt().ok_or_else(|| {
            StandardizeError::MalformedInput(format!(
                "anchor date {} cannot be advanced",
                anchor.date()
            ))
        })?;
        debug!(
            "first sample {} precedes anchor time {}; start date advanced to {}",
            first,
            anchor.time(),
            advanced
        );
        // A large implied gap usually means the filename carries a wrong
        // time, which would shift every date in the output unnoticed.
        let gap_secs = i64::from(86_400 - anchor.time().num_seconds_from_midnight())
            + i64::from(first.num_seconds_from_midnight());
        if gap_secs > SUSPICIOUS_FIRST_GAP_HOURS * 3_600 {
            warn!(
                "{}h gap between anchor {} and first sample {}; check the source file name",
                gap_secs / 3_600,
                anchor.time(),
                first
            );
        }
        advanced
    } else {
        anchor.date()
    };

    // Explicit accumulator: (output, carried date, previous time). The carried
    // date accumulates rollovers across the whole sequence.
    let init = (
        vec![start_date.and_time(first)],
        start_date,
        first,
    );
    let (aligned, _, _) = times[1..]
        .iter()
        .try_fold(init, |(mut acc, date, prev), &time| {
            let date = if time < prev {
                let advanced = date.succ_opt().ok_or_else(|| {
                    StandardizeError::MalformedInput(format!("date {} cannot be advanced", date))
                })?;
                debug!(
                    "rollover: {} < {}; carried date advanced to {}",
                    time, prev, advanced
                );
                advanced
            } else {
                date
            };
            acc.push(date.and_time(time));
            Ok::<_, StandardizeError>((acc, date, time))
        })?;

    Ok(aligned)
}

/// Parse-and-align convenience path for raw column strings.
///
/// All-or-nothing: a single unparsable row fails the whole sequence, so
/// callers never see a partially aligned table.
pub fn align_time_strings<S: AsRef<str>>(
    anchor: &Anchor,
    times: &[S],
) -> Result<Vec<NaiveDateTime>> {
    let parsed = times
        .iter()
        .map(|s| parse_time_of_day(s.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    align_timestamps(anchor, &parsed)
}
