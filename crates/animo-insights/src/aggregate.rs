//! Frequency counts, intensity averages, and time-bucket histograms.
//!
//! Everything here is a pure function of the entry slice. Rankings use stable
//! sorts so ties keep first-seen (or bucket-index) order.

use std::collections::HashMap;

use chrono::{Datelike, FixedOffset, Timelike};

use animo_core::entities::Entry;

/// `(label, count)` pairs, count descending, ties in first-seen order.
pub type LabelCounts = Vec<(String, usize)>;

/// Count a multiset of labels.
pub fn count_labels<I, S>(labels: I) -> LabelCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: LabelCounts = Vec::new();
    for label in labels {
        let label = label.as_ref();
        if let Some(&slot) = index.get(label) {
            counts[slot].1 += 1;
        } else {
            index.insert(label.to_string(), counts.len());
            counts.push((label.to_string(), 1));
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Life areas of entries carrying at least one pleasant emotion.
#[must_use]
pub fn positive_areas(entries: &[Entry]) -> LabelCounts {
    count_labels(
        entries
            .iter()
            .filter(|entry| entry.has_pleasant_emotion())
            .flat_map(|entry| entry.life_areas.iter()),
    )
}

/// Life areas of entries carrying at least one non-pleasant emotion.
#[must_use]
pub fn negative_areas(entries: &[Entry]) -> LabelCounts {
    count_labels(
        entries
            .iter()
            .filter(|entry| entry.has_unpleasant_emotion())
            .flat_map(|entry| entry.life_areas.iter()),
    )
}

/// Mean intensity of one emotion name.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionStat {
    pub name: String,
    pub mean: f64,
    pub count: usize,
}

/// Per-emotion mean intensity, mean descending.
#[must_use]
pub fn emotion_averages(entries: &[Entry]) -> Vec<EmotionStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, f64, usize)> = Vec::new();
    for emotion in entries.iter().flat_map(|entry| entry.emotions.iter()) {
        if let Some(&slot) = index.get(emotion.name.as_str()) {
            sums[slot].1 += emotion.intensity;
            sums[slot].2 += 1;
        } else {
            index.insert(emotion.name.as_str(), sums.len());
            sums.push((emotion.name.as_str(), emotion.intensity, 1));
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let mut stats: Vec<EmotionStat> = sums
        .into_iter()
        .map(|(name, sum, count)| EmotionStat {
            name: name.to_string(),
            mean: sum / count as f64,
            count,
        })
        .collect();
    stats.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    stats
}

/// Entry counts per local hour of day and day of week (0 = Sunday).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeHistogram {
    pub by_hour: [usize; 24],
    pub by_weekday: [usize; 7],
}

impl TimeHistogram {
    /// Bucket every entry's event time in `offset` local time.
    ///
    /// Timestamps outside chrono's representable range are skipped.
    #[must_use]
    pub fn build(entries: &[Entry], offset: FixedOffset) -> Self {
        let mut histogram = Self::default();
        for local in entries.iter().filter_map(|entry| entry.local_time(offset)) {
            histogram.by_hour[local.hour() as usize] += 1;
            histogram.by_weekday[local.weekday().num_days_from_sunday() as usize] += 1;
        }
        histogram
    }
}

/// The `n` busiest non-empty buckets as `(bucket, count)`, ties by bucket index.
#[must_use]
pub fn top_buckets(buckets: &[usize], n: usize) -> Vec<(usize, usize)> {
    let mut ranked: Vec<(usize, usize)> = buckets
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, count)| count > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// All aggregator outputs for one report.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub total: usize,
    pub pleasant_count: usize,
    pub area_counts: LabelCounts,
    pub positive_areas: LabelCounts,
    pub negative_areas: LabelCounts,
    pub emotion_stats: Vec<EmotionStat>,
    pub histogram: TimeHistogram,
}

impl Aggregates {
    #[must_use]
    pub fn compute(entries: &[Entry], offset: FixedOffset) -> Self {
        Self {
            total: entries.len(),
            pleasant_count: entries
                .iter()
                .filter(|entry| entry.has_pleasant_emotion())
                .count(),
            area_counts: count_labels(entries.iter().flat_map(|entry| entry.life_areas.iter())),
            positive_areas: positive_areas(entries),
            negative_areas: negative_areas(entries),
            emotion_stats: emotion_averages(entries),
            histogram: TimeHistogram::build(entries, offset),
        }
    }

    /// Share of entries with a pleasant emotion, in percent. Zero when empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pleasant_pct(&self) -> f64 {
        self.pleasant_count as f64 / self.total.max(1) as f64 * 100.0
    }

    #[must_use]
    pub fn top_hours(&self) -> Vec<(usize, usize)> {
        top_buckets(&self.histogram.by_hour, 2)
    }

    #[must_use]
    pub fn top_weekdays(&self) -> Vec<(usize, usize)> {
        top_buckets(&self.histogram.by_weekday, 2)
    }
}
