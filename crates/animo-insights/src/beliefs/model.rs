//! Batched chat-model belief extraction.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use animo_core::beliefs::{BeliefOrigin, CandidateBelief};
use animo_core::entities::Entry;
use animo_llm::{ChatClient, ChatRequest};

use super::{BeliefExtractor, ExtractionError};

const SYSTEM_PROMPT: &str = "Eres un analista que detecta creencias limitantes en textos personales en español.
Debes señalar SOLO frases que aparezcan literalmente (o casi literalmente) en los textos del usuario.
Para cada registro (id), revisa what_happened, thoughts y reaction, y extrae posibles creencias limitantes.
No inventes, no parafrasees.";

const USER_PROMPT_HEADER: &str = r#"Analiza y devuelve un objeto JSON { "results": [...] } cuyo array contenga objetos:
{ "id": "<id del registro>", "creencia": "<frase literal>", "origen": "what_happened|thoughts|reaction" }

Textos por registro:
"#;

/// One entry as sent to the model.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BatchRecord {
    pub id: String,
    pub what_happened: String,
    pub thoughts: String,
    pub reaction: String,
}

fn truncate_chars(text: Option<&str>, max_chars: usize) -> String {
    text.unwrap_or_default().chars().take(max_chars).collect()
}

/// Batch payload: record key plus each text field cut to `max_chars` characters.
#[must_use]
pub fn batch_payload(entries: &[Entry], max_chars: usize) -> Vec<BatchRecord> {
    entries
        .iter()
        .map(|entry| BatchRecord {
            id: entry.record_key(),
            what_happened: truncate_chars(entry.what_happened.as_deref(), max_chars),
            thoughts: truncate_chars(entry.thoughts.as_deref(), max_chars),
            reaction: truncate_chars(entry.reaction.as_deref(), max_chars),
        })
        .collect()
}

fn record_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn candidate(item: &Value) -> Option<CandidateBelief> {
    let phrase = item.get("creencia")?.as_str()?;
    if phrase.is_empty() {
        return None;
    }
    Some(CandidateBelief {
        record_id: record_id(item.get("id"))?,
        phrase: phrase.to_string(),
        origin: BeliefOrigin::from_tag(item.get("origen")?.as_str()?)?,
    })
}

/// The array an object reply wraps: `results` when present, otherwise its
/// only array-valued field.
fn wrapped_items(object: &Map<String, Value>) -> Result<&[Value], ExtractionError> {
    match object.get("results") {
        Some(Value::Array(items)) => return Ok(items.as_slice()),
        Some(Value::Null) => return Ok(&[]),
        Some(_) => return Err(ExtractionError::Parse("'results' is not an array".into())),
        None => {}
    }

    let mut arrays = object.values().filter_map(Value::as_array);
    match (arrays.next(), arrays.next()) {
        (None, _) => Ok(&[]),
        (Some(items), None) => Ok(items.as_slice()),
        (Some(_), Some(_)) => Err(ExtractionError::Parse(
            "object wraps more than one array".into(),
        )),
    }
}

/// Parse the model's reply: a bare array, or an object wrapping the array
/// (under `results` or as its single array field).
///
/// Items lacking an id, a phrase, or a known origin are discarded.
///
/// # Errors
///
/// `ExtractionError::Parse` when the content is not JSON or has no usable list.
pub fn parse_candidates(content: &str) -> Result<Vec<CandidateBelief>, ExtractionError> {
    let parsed: Value = serde_json::from_str(content)
        .map_err(|e| ExtractionError::Parse(format!("invalid JSON: {e}")))?;

    let items: &[Value] = match &parsed {
        Value::Array(items) => items.as_slice(),
        Value::Object(object) => wrapped_items(object)?,
        _ => {
            return Err(ExtractionError::Parse(
                "expected an array or an object".into(),
            ));
        }
    };

    Ok(items.iter().filter_map(candidate).collect())
}

pub struct ModelExtractor {
    client: Arc<dyn ChatClient>,
    max_field_chars: usize,
}

impl ModelExtractor {
    #[must_use]
    pub fn new(client: Arc<dyn ChatClient>, max_field_chars: usize) -> Self {
        Self {
            client,
            max_field_chars,
        }
    }

    fn request(&self, entries: &[Entry]) -> Result<ChatRequest, ExtractionError> {
        let payload = serde_json::to_string_pretty(&batch_payload(entries, self.max_field_chars))
            .map_err(|e| ExtractionError::Parse(format!("encode batch: {e}")))?;
        Ok(ChatRequest::json(
            SYSTEM_PROMPT,
            format!("{USER_PROMPT_HEADER}{payload}"),
        ))
    }
}

#[async_trait]
impl BeliefExtractor for ModelExtractor {
    fn name(&self) -> &'static str {
        "model"
    }

    async fn extract(&self, entries: &[Entry]) -> Result<Vec<CandidateBelief>, ExtractionError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let request = self.request(entries)?;
        let content = self.client.complete(&request).await?;
        let candidates = parse_candidates(&content)?;
        tracing::debug!(
            records = entries.len(),
            candidates = candidates.len(),
            "model belief extraction finished"
        );
        Ok(candidates)
    }
}
