//! Limiting-belief extraction strategies.
//!
//! [`HeuristicExtractor`] is deterministic and always available.
//! [`ModelExtractor`] sends one batched chat request. [`FallbackExtractor`]
//! runs a primary strategy and reruns the heuristic over every entry if it
//! fails; the engine wraps whichever strategy it is given.

pub mod fallback;
pub mod heuristic;
pub mod model;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use animo_core::beliefs::CandidateBelief;
use animo_core::entities::Entry;
use animo_llm::{ChatClient, LlmError};

pub use fallback::FallbackExtractor;
pub use heuristic::HeuristicExtractor;
pub use model::ModelExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("belief model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("belief model returned unusable content: {0}")]
    Parse(String),
}

#[async_trait]
pub trait BeliefExtractor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Candidate beliefs for `entries`, tagged with each entry's record key.
    async fn extract(&self, entries: &[Entry]) -> Result<Vec<CandidateBelief>, ExtractionError>;
}

/// Model-backed extraction when a chat client is available, the heuristic
/// otherwise.
#[must_use]
pub fn select_extractor(
    client: Option<Arc<dyn ChatClient>>,
    max_field_chars: usize,
) -> Arc<dyn BeliefExtractor> {
    match client {
        Some(client) => Arc::new(ModelExtractor::new(client, max_field_chars)),
        None => Arc::new(HeuristicExtractor),
    }
}
