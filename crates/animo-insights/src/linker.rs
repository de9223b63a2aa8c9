//! Join candidate beliefs back to their entries and drop repeats.

use std::collections::{HashMap, HashSet};

use animo_core::beliefs::{BeliefContext, CandidateBelief, LinkedBelief};
use animo_core::entities::Entry;

/// Characters of each text field that take part in the duplicate key.
pub const DEDUPE_PREFIX_CHARS: usize = 60;

fn trimmed(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Entries by their record key. The first entry registered for a key keeps it.
fn index_entries(entries: &[Entry]) -> HashMap<String, &Entry> {
    let mut index = HashMap::new();
    for entry in entries {
        index.entry(entry.record_key()).or_insert(entry);
    }
    index
}

fn link_one(candidate: &CandidateBelief, entry: &Entry) -> Option<LinkedBelief> {
    let phrase = candidate.phrase.trim();
    if phrase.is_empty() {
        return None;
    }
    Some(LinkedBelief {
        phrase: phrase.to_string(),
        origin: candidate.origin,
        emotions: entry
            .emotions
            .iter()
            .map(|emotion| emotion.name.clone())
            .filter(|name| !name.is_empty())
            .collect(),
        context: BeliefContext {
            what_happened: trimmed(entry.what_happened.as_deref()),
            thoughts: trimmed(entry.thoughts.as_deref()),
            reaction: trimmed(entry.reaction.as_deref()),
        },
        areas: entry.life_areas.clone(),
    })
}

/// Resolve each candidate's record id; unmatched candidates are dropped.
#[must_use]
pub fn link_beliefs(candidates: &[CandidateBelief], entries: &[Entry]) -> Vec<LinkedBelief> {
    let index = index_entries(entries);
    candidates
        .iter()
        .filter_map(|candidate| {
            let entry = index.get(candidate.record_id.as_str())?;
            link_one(candidate, entry)
        })
        .collect()
}

fn prefix(text: Option<&str>) -> String {
    text.unwrap_or_default()
        .chars()
        .take(DEDUPE_PREFIX_CHARS)
        .collect()
}

/// Identity of one belief occurrence: phrase plus the start of each text field.
#[must_use]
pub fn dedupe_key(belief: &LinkedBelief) -> (String, String, String, String) {
    (
        belief.phrase.clone(),
        prefix(belief.context.what_happened.as_deref()),
        prefix(belief.context.thoughts.as_deref()),
        prefix(belief.context.reaction.as_deref()),
    )
}

/// Keep the first occurrence of every key, preserving order.
#[must_use]
pub fn dedupe_beliefs(beliefs: Vec<LinkedBelief>) -> Vec<LinkedBelief> {
    let mut seen = HashSet::new();
    beliefs
        .into_iter()
        .filter(|belief| seen.insert(dedupe_key(belief)))
        .collect()
}
