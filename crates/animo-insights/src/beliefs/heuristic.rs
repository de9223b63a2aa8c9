//! Regex heuristic for limiting beliefs.

use std::collections::HashSet;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::RegexSet;

use animo_core::beliefs::{BeliefOrigin, CandidateBelief};
use animo_core::entities::Entry;

use super::{BeliefExtractor, ExtractionError};

/// Spans examined per text field.
pub const MAX_SPANS_PER_FIELD: usize = 10;

static BELIEF_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // First-person negation
        r"(?i)\b(?:no soy|no puedo|no valgo|no sirvo|no merezco|no me sale)\b",
        // Universal quantifiers
        r"(?i)\b(?:siempre|nunca|nadie|todos)\b",
        // Fear of rejection
        r"(?i)\b(?:no me entienden|me van a rechazar|siempre me critican)\b",
        // Totalizing statements about the world
        r"(?i)\b(?:el mundo|la vida|todo es|siempre es|nunca es|la gente es)\b",
    ])
    .expect("belief patterns are valid")
});

const fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn push_span<'a>(spans: &mut Vec<&'a str>, span: &'a str) {
    let span = span.trim();
    if !span.is_empty() {
        spans.push(span);
    }
}

/// Split text into sentence-like spans.
///
/// Breaks on a whitespace run that follows `.`, `!` or `?`, and on any run of
/// newlines. Spans are trimmed; empty spans are dropped.
#[must_use]
pub fn split_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let after_terminator = ch.is_whitespace() && prev.is_some_and(is_terminator);
        if !after_terminator && ch != '\n' {
            prev = Some(ch);
            continue;
        }

        let mut end = idx + ch.len_utf8();
        let mut last = ch;
        while let Some(&(next_idx, next)) = chars.peek() {
            let extends = if after_terminator {
                next.is_whitespace()
            } else {
                next == '\n'
            };
            if !extends {
                break;
            }
            end = next_idx + next.len_utf8();
            last = next;
            chars.next();
        }

        push_span(&mut spans, &text[start..idx]);
        start = end;
        prev = Some(last);
    }
    push_span(&mut spans, &text[start..]);
    spans
}

/// Whether a span contains an absolutist or self-deprecating phrase.
#[must_use]
pub fn is_belief_span(span: &str) -> bool {
    BELIEF_PATTERNS.is_match(span)
}

/// Candidates found in one entry, deduplicated by phrase and origin.
#[must_use]
pub fn extract_from_entry(entry: &Entry) -> Vec<CandidateBelief> {
    let record_id = entry.record_key();
    let mut seen: HashSet<(&str, BeliefOrigin)> = HashSet::new();
    let mut out = Vec::new();

    for origin in BeliefOrigin::ALL {
        let Some(text) = entry.text(origin) else {
            continue;
        };
        for span in split_spans(text).into_iter().take(MAX_SPANS_PER_FIELD) {
            if is_belief_span(span) && seen.insert((span, origin)) {
                out.push(CandidateBelief {
                    record_id: record_id.clone(),
                    phrase: span.to_string(),
                    origin,
                });
            }
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    /// Synchronous extraction; never fails.
    #[must_use]
    pub fn extract_all(entries: &[Entry]) -> Vec<CandidateBelief> {
        entries.iter().flat_map(extract_from_entry).collect()
    }
}

#[async_trait]
impl BeliefExtractor for HeuristicExtractor {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn extract(&self, entries: &[Entry]) -> Result<Vec<CandidateBelief>, ExtractionError> {
        Ok(Self::extract_all(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn with_thoughts(id: &str, thoughts: &str) -> Entry {
        Entry {
            id: Some(id.to_string()),
            event_ts: 1,
            thoughts: Some(thoughts.to_string()),
            ..Default::default()
        }
    }

    #[rstest]
    #[case::terminators("Hola. ¿Qué tal? ¡Bien!", vec!["Hola.", "¿Qué tal?", "¡Bien!"])]
    #[case::newlines("uno\n\ndos\ntres", vec!["uno", "dos", "tres"])]
    #[case::whitespace_run_after_terminator("Fin.  \n  Otro", vec!["Fin.", "Otro"])]
    #[case::no_split_mid_sentence("Esto es 3.5 veces más", vec!["Esto es 3.5 veces más"])]
    #[case::space_without_terminator("a \n b", vec!["a", "b"])]
    #[case::blank("   \n\n  ", vec![])]
    #[case::empty("", vec![])]
    fn split_spans_cases(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_spans(text), expected);
    }

    #[rstest]
    #[case::negation("Creo que no valgo para esto")]
    #[case::quantifier("Nunca voy a mejorar en esto.")]
    #[case::rejection("Seguro que me van a rechazar")]
    #[case::world("La gente es egoísta")]
    #[case::uppercase("NADIE ME ESCUCHA")]
    fn matching_spans(#[case] span: &str) {
        assert!(is_belief_span(span));
    }

    #[rstest]
    #[case::neutral("Hoy salí a caminar", false)]
    #[case::prefix_of_longer_word("Siempreviva en el jardín", false)]
    #[case::suffix_of_longer_word("Eran nosotrosnunca", false)]
    #[case::whole_word("Vinieron todos", true)]
    fn patterns_are_word_bounded(#[case] span: &str, #[case] expected: bool) {
        assert_eq!(is_belief_span(span), expected);
    }

    #[test]
    fn single_sentence_belief() {
        let candidates = extract_from_entry(&with_thoughts("7", "Nunca voy a mejorar en esto."));
        assert_eq!(
            candidates,
            vec![CandidateBelief {
                record_id: "7".into(),
                phrase: "Nunca voy a mejorar en esto.".into(),
                origin: BeliefOrigin::Thoughts,
            }]
        );
    }

    #[test]
    fn at_most_ten_spans_per_field() {
        let text = (0..15).map(|i| format!("Nunca {i}.")).collect::<Vec<_>>().join(" ");
        let candidates = extract_from_entry(&with_thoughts("1", &text));
        assert_eq!(candidates.len(), MAX_SPANS_PER_FIELD);
        assert_eq!(candidates.last().unwrap().phrase, "Nunca 9.");
    }

    #[test]
    fn repeated_span_in_one_field_is_deduplicated() {
        let candidates = extract_from_entry(&with_thoughts("1", "No puedo.\nNo puedo."));
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn same_span_in_two_fields_is_kept_per_origin() {
        let entry = Entry {
            what_happened: Some("Nadie vino.".into()),
            ..with_thoughts("1", "Nadie vino.")
        };
        let origins: Vec<_> = extract_from_entry(&entry).into_iter().map(|c| c.origin).collect();
        assert_eq!(origins, vec![BeliefOrigin::WhatHappened, BeliefOrigin::Thoughts]);
    }

    #[test]
    fn record_key_falls_back_to_timestamp() {
        let entry = Entry {
            id: None,
            event_ts: 1_700_000_000_000,
            reaction: Some("Todo es un desastre".into()),
            ..Default::default()
        };
        let candidates = extract_from_entry(&entry);
        assert_eq!(candidates[0].record_id, "1700000000000");
    }

    #[test]
    fn extraction_is_deterministic() {
        let entries = vec![
            with_thoughts("1", "Siempre me pasa lo mismo. No soy suficiente."),
            with_thoughts("2", "Hoy fue un buen día."),
        ];
        assert_eq!(
            HeuristicExtractor::extract_all(&entries),
            HeuristicExtractor::extract_all(&entries)
        );
        assert_eq!(HeuristicExtractor::extract_all(&entries).len(), 2);
    }
}
