use std::sync::Arc;

use async_trait::async_trait;

use animo_core::beliefs::CandidateBelief;
use animo_core::entities::Entry;

use super::{BeliefExtractor, ExtractionError, HeuristicExtractor};

/// Runs `primary`; on failure logs a warning and returns the heuristic result
/// for the whole batch. Never returns an error.
pub struct FallbackExtractor {
    primary: Arc<dyn BeliefExtractor>,
}

impl FallbackExtractor {
    #[must_use]
    pub fn new(primary: Arc<dyn BeliefExtractor>) -> Self {
        Self { primary }
    }

    /// Name of the wrapped strategy.
    #[must_use]
    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    /// Candidates from `primary`, or the heuristic over all of `entries` if it fails.
    pub async fn extract_or_heuristic(&self, entries: &[Entry]) -> Vec<CandidateBelief> {
        match self.primary.extract(entries).await {
            Ok(candidates) => candidates,
            Err(error) => {
                tracing::warn!(
                    strategy = self.primary.name(),
                    %error,
                    "belief extraction failed, using heuristic"
                );
                HeuristicExtractor::extract_all(entries)
            }
        }
    }
}

#[async_trait]
impl BeliefExtractor for FallbackExtractor {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn extract(&self, entries: &[Entry]) -> Result<Vec<CandidateBelief>, ExtractionError> {
        Ok(self.extract_or_heuristic(entries).await)
    }
}
