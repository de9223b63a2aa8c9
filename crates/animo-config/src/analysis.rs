//! Analysis pipeline configuration.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Days covered when a request gives no range.
const fn default_range_days() -> u32 {
    30
}

/// Largest accepted UTC offset, in minutes.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_range_days")]
    pub default_range_days: u32,

    /// Offset from UTC used for hour-of-day and day-of-week histograms.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_range_days: default_range_days(),
            utc_offset_minutes: 0,
        }
    }
}

impl AnalysisConfig {
    /// The histogram offset as a chrono `FixedOffset`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the offset exceeds ±14 hours.
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            field: "analysis.utc_offset_minutes".into(),
            reason: format!(
                "{} is outside ±{MAX_OFFSET_MINUTES} minutes",
                self.utc_offset_minutes
            ),
        };
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(invalid());
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(invalid)
    }
}
