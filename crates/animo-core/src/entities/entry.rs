use chrono::{DateTime, FixedOffset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::beliefs::BeliefOrigin;
use crate::errors::CoreError;
use crate::range::from_millis;
use crate::taxonomy;

/// Lowest accepted emotion intensity.
pub const MIN_INTENSITY: f64 = 1.0;
/// Highest accepted emotion intensity.
pub const MAX_INTENSITY: f64 = 10.0;

/// One emotion felt in an entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Emotion {
    pub name: String,
    /// Intensity on the 1–10 scale. Missing values read as 0.
    #[serde(default)]
    pub intensity: f64,
    /// Where in the body the emotion was felt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Emotion {
    #[must_use]
    pub fn is_pleasant(&self) -> bool {
        taxonomy::is_pleasant(&self.name)
    }
}

/// A journal entry as read back for analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Entry {
    pub id: Option<String>,
    /// Secondary identifier carried by some clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    /// Event time in epoch milliseconds.
    pub event_ts: i64,
    #[serde(default)]
    pub emotions: Vec<Emotion>,
    pub what_happened: Option<String>,
    pub thoughts: Option<String>,
    pub reaction: Option<String>,
    #[serde(default)]
    pub life_areas: Vec<String>,
}

impl Entry {
    /// Candidate keys identifying this entry, in precedence order:
    /// `id`, then `entry_id`, then the stringified timestamp.
    ///
    /// Empty identifiers are skipped. The last key is always present.
    #[must_use]
    pub fn record_keys(&self) -> Vec<String> {
        [self.id.as_deref(), self.entry_id.as_deref()]
            .into_iter()
            .flatten()
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .chain(std::iter::once(self.event_ts.to_string()))
            .collect()
    }

    /// The key this entry is resolved under: the first of [`Self::record_keys`].
    #[must_use]
    pub fn record_key(&self) -> String {
        self.record_keys()
            .into_iter()
            .next()
            .unwrap_or_else(|| self.event_ts.to_string())
    }

    /// Raw text of one free-text field.
    #[must_use]
    pub fn text(&self, origin: BeliefOrigin) -> Option<&str> {
        match origin {
            BeliefOrigin::WhatHappened => self.what_happened.as_deref(),
            BeliefOrigin::Thoughts => self.thoughts.as_deref(),
            BeliefOrigin::Reaction => self.reaction.as_deref(),
        }
    }

    /// At least one emotion belongs to the pleasant taxonomy.
    #[must_use]
    pub fn has_pleasant_emotion(&self) -> bool {
        self.emotions.iter().any(Emotion::is_pleasant)
    }

    /// At least one emotion falls outside the pleasant taxonomy.
    #[must_use]
    pub fn has_unpleasant_emotion(&self) -> bool {
        self.emotions.iter().any(|emotion| !emotion.is_pleasant())
    }

    /// Event time shifted to `offset`, `None` if the timestamp is out of range.
    #[must_use]
    pub fn local_time(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        from_millis(self.event_ts).map(|utc| utc.with_timezone(&offset))
    }
}

/// Payload for creating an entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub event_ts: i64,
    pub emotions: Vec<Emotion>,
    #[serde(default)]
    pub what_happened: Option<String>,
    #[serde(default)]
    pub thoughts: Option<String>,
    #[serde(default)]
    pub reaction: Option<String>,
    #[serde(default)]
    pub life_areas: Vec<String>,
}

impl NewEntry {
    /// Check the payload before it is stored.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a negative timestamp, an empty
    /// emotion list, a blank emotion name, or an intensity outside 1–10.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.event_ts < 0 {
            return Err(CoreError::Validation(
                "eventTs must be a non-negative integer".into(),
            ));
        }
        if self.emotions.is_empty() {
            return Err(CoreError::Validation(
                "at least one emotion is required".into(),
            ));
        }
        for emotion in &self.emotions {
            if emotion.name.trim().is_empty() {
                return Err(CoreError::Validation("emotion name is required".into()));
            }
            if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&emotion.intensity) {
                return Err(CoreError::Validation(format!(
                    "intensity for '{}' must be between {MIN_INTENSITY} and {MAX_INTENSITY}, got {}",
                    emotion.name, emotion.intensity
                )));
            }
        }
        Ok(())
    }
}
