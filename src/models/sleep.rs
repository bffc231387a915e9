// SPDX-License-Identifier: MIT

//! Fitbit sleep log models, matching the /sleep/list.json response shape.

use serde::Deserialize;

/// Fitbit sleep list API response.
#[derive(Debug, Clone, Deserialize)]
pub struct SleepListResponse {
    pub sleep: Vec<SleepLog>,
}

/// One sleep log entry from the Fitbit API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepLog {
    /// Recording device ID. Not reported for manually logged sleep.
    #[serde(default)]
    pub device_id: Option<String>,
    /// Sleep log ID
    pub log_id: u64,
    /// Sleep start date/time (ISO 8601)
    pub start_time: String,
    /// Sleep end date/time (ISO 8601)
    pub end_time: String,
    /// Sleep latency in minutes. Not reported for all devices.
    #[serde(default)]
    pub minutes_to_fall_asleep: Option<u32>,
    /// Total minutes asleep
    pub minutes_asleep: u32,
    /// Total minutes awake during the log
    pub minutes_awake: u32,
    /// Sleep stage breakdown, present for "stages"-type logs
    #[serde(default)]
    pub levels: Option<SleepLevels>,
}

/// Sleep stage level data.
#[derive(Debug, Clone, Deserialize)]
pub struct SleepLevels {
    #[serde(default)]
    pub summary: Option<SleepSummary>,
}

/// Per-stage summary. A well-formed stages log carries all four stages.
#[derive(Debug, Clone, Deserialize)]
pub struct SleepSummary {
    #[serde(default)]
    pub deep: Option<StageSummary>,
    #[serde(default)]
    pub light: Option<StageSummary>,
    #[serde(default)]
    pub rem: Option<StageSummary>,
    #[serde(default)]
    pub wake: Option<StageSummary>,
}

/// Count and total minutes for one sleep stage.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StageSummary {
    pub count: u32,
    pub minutes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_log_deserializes_full_record() {
        let json = r#"{
            "deviceId": "tracker-1",
            "logId": 42,
            "startTime": "2024-05-01T23:10:00.000",
            "endTime": "2024-05-02T07:02:30.000",
            "minutesToFallAsleep": 12,
            "minutesAsleep": 430,
            "minutesAwake": 40,
            "levels": {
                "summary": {
                    "deep": {"count": 4, "minutes": 80},
                    "light": {"count": 20, "minutes": 230},
                    "rem": {"count": 6, "minutes": 120},
                    "wake": {"count": 18, "minutes": 40}
                }
            }
        }"#;

        let log: SleepLog = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(log.device_id.as_deref(), Some("tracker-1"));
        assert_eq!(log.log_id, 42);
        assert_eq!(log.minutes_to_fall_asleep, Some(12));

        let summary = log.levels.unwrap().summary.unwrap();
        assert_eq!(summary.deep.unwrap().minutes, 80);
        assert_eq!(summary.wake.unwrap().count, 18);
    }

    #[test]
    fn test_sleep_log_optional_fields_absent() {
        // Manually logged sleep: no device, no latency, no stage data
        let json = r#"{
            "logId": 7,
            "startTime": "2024-05-01T23:10:00.000",
            "endTime": "2024-05-02T07:02:30.000",
            "minutesAsleep": 400,
            "minutesAwake": 72
        }"#;

        let log: SleepLog = serde_json::from_str(json).expect("should deserialize");
        assert!(log.device_id.is_none());
        assert!(log.minutes_to_fall_asleep.is_none());
        assert!(log.levels.is_none());
    }
}
