// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod sleep;

pub use sleep::{SleepLevels, SleepListResponse, SleepLog, SleepSummary, StageSummary};
