// SPDX-License-Identifier: MIT

//! Flattens sleep records into the fixed 15-column CSV export.

use crate::models::SleepLog;

/// Header row for the export. Column order matches `flatten_record`.
pub const CSV_HEADER: &str = "Device ID,Log ID,Date/Time of Sleep Start,\
Date/Time of Sleep End,Minutes to Fall Asleep,Minutes Asleep,Minutes Awake,\
Deep Stage Count,Deep Stage Minutes,Light Stage Count,Light Stage Minutes,\
REM Stage Count,REM Stage Minutes,Wake Stage Count,Wake Stage Minutes";

/// Placeholder for optional fields so row width stays invariant.
const MISSING: &str = "N/A";

/// Project one sleep record into its 15-column row.
///
/// Returns `None` when the stage summary is absent or incomplete: such a
/// record cannot be rendered without shifting columns, so the caller skips
/// it (observably) instead.
pub fn flatten_record(record: &SleepLog) -> Option<String> {
    let summary = record.levels.as_ref()?.summary.as_ref()?;
    let deep = summary.deep?;
    let light = summary.light?;
    let rem = summary.rem?;
    let wake = summary.wake?;

    let device_id = record.device_id.as_deref().unwrap_or(MISSING);
    let latency = record
        .minutes_to_fall_asleep
        .map(|m| m.to_string())
        .unwrap_or_else(|| MISSING.to_string());

    Some(format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        device_id,
        record.log_id,
        record.start_time,
        record.end_time,
        latency,
        record.minutes_asleep,
        record.minutes_awake,
        deep.count,
        deep.minutes,
        light.count,
        light.minutes,
        rem.count,
        rem.minutes,
        wake.count,
        wake.minutes,
    ))
}

/// Assemble the full CSV: header plus one newline-terminated row per record,
/// in the order the records were fetched. Records without a complete stage
/// summary are skipped with a warning.
pub fn build_csv(records: &[SleepLog]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + records.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for record in records {
        match flatten_record(record) {
            Some(row) => {
                out.push_str(&row);
                out.push('\n');
            }
            None => {
                tracing::warn!(
                    log_id = record.log_id,
                    "Skipping sleep record with incomplete stage summary"
                );
            }
        }
    }

    out
}

/// Export filename keyed by the export date, e.g. `sleep_data_2024-05-01.csv`.
pub fn export_filename(date: &str) -> String {
    format!("sleep_data_{}.csv", date)
}
