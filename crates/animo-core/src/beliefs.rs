//! Limiting-belief types.
//!
//! A [`CandidateBelief`] is what an extraction strategy emits: a phrase plus
//! the record and field it came from. Linking against the analysed entries
//! turns it into a [`LinkedBelief`], which is what the report exposes.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Free-text field of an entry that a belief was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BeliefOrigin {
    WhatHappened,
    Thoughts,
    Reaction,
}

impl BeliefOrigin {
    /// All origins, in the order fields are scanned.
    pub const ALL: [Self; 3] = [Self::WhatHappened, Self::Thoughts, Self::Reaction];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WhatHappened => "what_happened",
            Self::Thoughts => "thoughts",
            Self::Reaction => "reaction",
        }
    }

    /// Parse a wire tag. Returns `None` for anything but the three field tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|origin| origin.as_str() == tag.trim())
    }
}

impl fmt::Display for BeliefOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A belief as produced by an extractor, before linking.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CandidateBelief {
    /// Record key of the source entry (see `Entry::record_key`).
    #[serde(rename = "id")]
    pub record_id: String,
    /// Literal or near-literal phrase from the entry text.
    #[serde(rename = "creencia")]
    pub phrase: String,
    #[serde(rename = "origen")]
    pub origin: BeliefOrigin,
}

/// The raw text fields of the entry a belief was found in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BeliefContext {
    #[serde(rename = "quePaso")]
    pub what_happened: Option<String>,
    #[serde(rename = "pensamientos")]
    pub thoughts: Option<String>,
    #[serde(rename = "reaccion")]
    pub reaction: Option<String>,
}

/// A belief joined back to the emotions, texts, and life areas of its entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkedBelief {
    #[serde(rename = "creencia")]
    pub phrase: String,
    #[serde(rename = "origen")]
    pub origin: BeliefOrigin,
    #[serde(rename = "emociones")]
    pub emotions: Vec<String>,
    #[serde(rename = "patrones")]
    pub context: BeliefContext,
    pub areas: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_tags_roundtrip() {
        for origin in BeliefOrigin::ALL {
            assert_eq!(BeliefOrigin::from_tag(origin.as_str()), Some(origin));
        }
    }

    #[test]
    fn unknown_origin_tag_is_rejected() {
        assert_eq!(BeliefOrigin::from_tag("feelings"), None);
        assert_eq!(BeliefOrigin::from_tag(""), None);
    }

    #[test]
    fn linked_belief_serializes_with_report_field_names() {
        let belief = LinkedBelief {
            phrase: "Nunca lo consigo.".into(),
            origin: BeliefOrigin::Thoughts,
            emotions: vec!["Triste".into()],
            context: BeliefContext {
                what_happened: None,
                thoughts: Some("Nunca lo consigo.".into()),
                reaction: None,
            },
            areas: vec!["Trabajo".into()],
        };
        let value = serde_json::to_value(&belief).unwrap();
        assert_eq!(value["creencia"], "Nunca lo consigo.");
        assert_eq!(value["origen"], "thoughts");
        assert_eq!(value["emociones"][0], "Triste");
        assert!(value["patrones"]["quePaso"].is_null());
        assert_eq!(value["patrones"]["pensamientos"], "Nunca lo consigo.");
        assert!(value["patrones"]["reaccion"].is_null());
        assert_eq!(value["areas"][0], "Trabajo");
    }
}
