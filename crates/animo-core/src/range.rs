//! Query time range in epoch milliseconds.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 3600 * 1000;

/// Closed interval `[from, to]` of epoch-millisecond timestamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    /// Build a range, rejecting `from > to`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the bounds are inverted.
    pub fn new(from: i64, to: i64) -> Result<Self, CoreError> {
        if from > to {
            return Err(CoreError::Validation(format!(
                "range start {from} is after range end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// The `days`-long window ending at `now_ms`.
    #[must_use]
    pub const fn trailing_days(now_ms: i64, days: u32) -> Self {
        Self {
            from: now_ms.saturating_sub(days as i64 * DAY_MS),
            to: now_ms,
        }
    }

    /// Fill missing bounds: `to` defaults to `now_ms`, `from` to `default_days`
    /// before `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the resolved bounds are inverted.
    pub fn resolve(
        from: Option<i64>,
        to: Option<i64>,
        now_ms: i64,
        default_days: u32,
    ) -> Result<Self, CoreError> {
        let fallback = Self::trailing_days(now_ms, default_days);
        Self::new(from.unwrap_or(fallback.from), to.unwrap_or(fallback.to))
    }

    /// Whether `ts` lies inside the range (both ends inclusive).
    #[must_use]
    pub const fn contains(&self, ts: i64) -> bool {
        self.from <= ts && ts <= self.to
    }
}

/// Current wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert epoch milliseconds to a UTC datetime, `None` when out of range.
#[must_use]
pub fn from_millis(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ts)
}
