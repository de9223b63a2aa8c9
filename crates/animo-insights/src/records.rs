//! Client-supplied records used when the store has nothing for the range.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use animo_core::entities::{Emotion, Entry};

/// A record as sent inline by a client. Identifiers and timestamps arrive
/// loosely typed (strings or numbers). Fields of the wrong type read as
/// absent, so any JSON object is a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub ts: Option<Value>,
    #[serde(default)]
    pub event_ts: Option<Value>,
    #[serde(default, deserialize_with = "loose_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "loose_emotions")]
    pub emotions: Vec<Emotion>,
    #[serde(default, deserialize_with = "loose_text")]
    pub what_happened: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub thoughts: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub reaction: Option<String>,
    #[serde(default, deserialize_with = "loose_labels")]
    pub life_areas: Vec<String>,
}

fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn loose_labels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

/// Intensity from a number or numeric string; anything else reads as 0.
fn loose_intensity(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or_default(),
        _ => 0.0,
    }
}

/// Emotions without a name are skipped.
fn loose_emotion(value: &Value) -> Option<Emotion> {
    let name = value.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    Some(Emotion {
        name: name.to_string(),
        intensity: loose_intensity(value.get("intensity")),
        body: value.get("body").and_then(Value::as_str).map(str::to_string),
    })
}

fn loose_emotions<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Emotion>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|items| items.iter().filter_map(loose_emotion).collect())
        .unwrap_or_default())
}

/// Records from raw JSON values. Values that are not objects are skipped.
#[must_use]
pub fn parse_records(values: Vec<Value>) -> Vec<InlineRecord> {
    let total = values.len();
    let records: Vec<InlineRecord> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if records.len() < total {
        tracing::debug!(dropped = total - records.len(), "malformed inline records dropped");
    }
    records
}

/// Deserialize a record list, skipping malformed items instead of failing.
/// `null` reads as an empty list.
///
/// # Errors
///
/// Fails only when the value is neither an array nor `null`.
pub fn lenient_records<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<InlineRecord>, D::Error> {
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(parse_records(values.unwrap_or_default()))
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

fn value_to_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn finite_to_millis(value: f64) -> Option<i64> {
    (value.is_finite() && value.abs() < 9.0e15).then(|| value.trunc() as i64)
}

/// Millisecond timestamp from a number or numeric string.
fn value_to_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(finite_to_millis)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(finite_to_millis))
        }
        _ => None,
    }
}

/// Parse an RFC 3339 timestamp, `YYYY-MM-DDTHH:MM:SS`, or `YYYY-MM-DD` (UTC).
fn parse_date(date: &str) -> Option<i64> {
    let date = date.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

impl InlineRecord {
    /// Event time: `ts`, else `eventTs`, else parsed `date`, else `now_ms`.
    ///
    /// The first field that is present decides; if it cannot be read the
    /// record has no usable timestamp.
    #[must_use]
    pub fn timestamp(&self, now_ms: i64) -> Option<i64> {
        if let Some(value) = present(self.ts.as_ref()).or_else(|| present(self.event_ts.as_ref())) {
            return value_to_millis(value);
        }
        match &self.date {
            Some(date) => parse_date(date),
            None => Some(now_ms),
        }
    }

    /// Record identifier: `id`, else the raw `ts`, else the position in the batch.
    #[must_use]
    pub fn key(&self, index: usize) -> String {
        present(self.id.as_ref())
            .or_else(|| present(self.ts.as_ref()))
            .map_or_else(|| index.to_string(), value_to_key)
    }

    /// Convert to an [`Entry`], `None` when the timestamp is unusable.
    #[must_use]
    pub fn to_entry(&self, index: usize, now_ms: i64) -> Option<Entry> {
        Some(Entry {
            id: Some(self.key(index)),
            entry_id: None,
            event_ts: self.timestamp(now_ms)?,
            emotions: self.emotions.clone(),
            what_happened: self.what_happened.clone(),
            thoughts: self.thoughts.clone(),
            reaction: self.reaction.clone(),
            life_areas: self.life_areas.clone(),
        })
    }
}

/// Normalize a batch, dropping records whose timestamp cannot be read.
#[must_use]
pub fn normalize_records(records: &[InlineRecord], now_ms: i64) -> Vec<Entry> {
    let entries: Vec<Entry> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| record.to_entry(index, now_ms))
        .collect();
    if entries.len() < records.len() {
        tracing::debug!(
            dropped = records.len() - entries.len(),
            "inline records without a usable timestamp dropped"
        );
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    fn record(value: Value) -> InlineRecord {
        serde_json::from_value(value).unwrap()
    }

    #[rstest]
    #[case::ts_number(json!({"ts": 1_000}), Some(1_000))]
    #[case::ts_numeric_string(json!({"ts": "2000"}), Some(2_000))]
    #[case::ts_float(json!({"ts": 3000.7}), Some(3_000))]
    #[case::event_ts(json!({"eventTs": 4_000}), Some(4_000))]
    #[case::ts_wins_over_event_ts(json!({"ts": 1, "eventTs": 2}), Some(1))]
    #[case::null_ts_falls_through(json!({"ts": null, "eventTs": 2}), Some(2))]
    #[case::date_only(json!({"date": "2024-01-02"}), Some(1_704_153_600_000))]
    #[case::rfc3339(json!({"date": "2024-01-02T10:00:00Z"}), Some(1_704_189_600_000))]
    #[case::nothing_means_now(json!({}), Some(NOW))]
    #[case::garbage_ts(json!({"ts": "ayer"}), None)]
    #[case::garbage_date(json!({"date": "el martes"}), None)]
    #[case::bool_ts(json!({"ts": true}), None)]
    fn timestamp_resolution(#[case] value: Value, #[case] expected: Option<i64>) {
        assert_eq!(record(value).timestamp(NOW), expected);
    }

    #[rstest]
    #[case::string_id(json!({"id": "abc", "ts": 5}), "abc")]
    #[case::numeric_id(json!({"id": 12}), "12")]
    #[case::ts_as_id(json!({"ts": 5}), "5")]
    #[case::index_as_id(json!({}), "3")]
    fn key_resolution(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(record(value).key(3), expected);
    }

    #[test]
    fn camel_case_fields_map_to_entry() {
        let records = vec![record(json!({
            "id": "r1",
            "ts": 10,
            "emotions": [{"name": "Alegre", "intensity": 8}],
            "whatHappened": "Cena con amigos",
            "thoughts": "Qué bien",
            "lifeAreas": ["Ocio"]
        }))];
        let entries = normalize_records(&records, NOW);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_deref(), Some("r1"));
        assert_eq!(entries[0].what_happened.as_deref(), Some("Cena con amigos"));
        assert_eq!(entries[0].life_areas, vec!["Ocio".to_string()]);
        assert!(entries[0].has_pleasant_emotion());
    }

    #[test]
    fn loosely_typed_fields_are_repaired() {
        let record = record(json!({
            "id": "r1",
            "ts": 10,
            "emotions": [
                {"name": "Triste", "intensity": "6"},
                {"name": "Ansiosa"},
                {"intensity": 9},
                {"name": "  "},
                "Alegre"
            ],
            "thoughts": 42,
            "lifeAreas": ["Trabajo", 3, null]
        }));
        assert_eq!(
            record.emotions,
            vec![
                Emotion {
                    name: "Triste".into(),
                    intensity: 6.0,
                    body: None,
                },
                Emotion {
                    name: "Ansiosa".into(),
                    intensity: 0.0,
                    body: None,
                },
            ]
        );
        assert_eq!(record.thoughts, None);
        assert_eq!(record.life_areas, vec!["Trabajo".to_string()]);
    }

    #[test]
    fn non_object_records_are_skipped() {
        let records = parse_records(vec![
            json!({"id": "ok", "ts": 1, "emotions": [{"name": "Calma", "intensity": "x"}]}),
            json!("texto suelto"),
            json!(7),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].emotions[0].intensity, 0.0);
    }

    #[derive(Debug, Deserialize)]
    struct Batch {
        #[serde(default, deserialize_with = "lenient_records")]
        records: Vec<InlineRecord>,
    }

    #[rstest]
    #[case::missing(json!({}), 0)]
    #[case::null(json!({"records": null}), 0)]
    #[case::mixed(json!({"records": [{"ts": 1}, [1, 2], {"ts": 2, "emotions": [{"name": "Alegre", "intensity": "8"}]}]}), 2)]
    fn lenient_record_lists(#[case] value: Value, #[case] expected: usize) {
        let batch: Batch = serde_json::from_value(value).unwrap();
        assert_eq!(batch.records.len(), expected);
    }

    #[test]
    fn unreadable_timestamps_are_dropped() {
        let records = vec![
            record(json!({"id": "ok", "ts": 1})),
            record(json!({"id": "bad", "ts": "nunca"})),
        ];
        let ids: Vec<_> = normalize_records(&records, NOW)
            .into_iter()
            .filter_map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["ok".to_string()]);
    }
}
