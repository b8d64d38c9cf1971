//! Standardized table and summary emission.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use powerlog_core::error::Result;
use powerlog_core::schema;

use crate::reader::RawTable;

/// Write the standardized CSV table for one raw export.
///
/// The three standard columns (`Raw DateTime`, `Raw Date`, `Raw Time`) are
/// prepended and the tool-specific time column is dropped; every other source
/// column is carried through unchanged, in source order. `aligned` must hold
/// one timestamp per table row.
pub fn write_standard_csv(path: &Path, table: &RawTable, aligned: &[NaiveDateTime]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = vec![
        schema::RAW_DATETIME_COLUMN,
        schema::RAW_DATE_COLUMN,
        schema::RAW_TIME_COLUMN,
    ];
    header.extend(
        table
            .headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != table.time_column)
            .map(|(_, h)| h.as_str()),
    );
    writer.write_record(&header)?;

    for (row, timestamp) in table.rows.iter().zip(aligned) {
        let mut record: Vec<String> = vec![
            timestamp.format(schema::DATETIME_FORMAT).to_string(),
            timestamp.format(schema::DATE_FORMAT).to_string(),
            timestamp.format(schema::TIME_FORMAT).to_string(),
        ];
        record.extend(
            row.iter()
                .enumerate()
                .filter(|(i, _)| *i != table.time_column)
                .map(|(_, f)| f.clone()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a serializable summary record as pretty-printed JSON.
pub fn write_summary_json<T: Serialize>(path: &Path, summary: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}
