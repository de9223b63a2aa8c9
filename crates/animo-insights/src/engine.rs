//! The insight pipeline: aggregate, summarize, extract, link, assemble.

use std::sync::Arc;

use chrono::FixedOffset;

use animo_config::{AnalysisConfig, LlmConfig};
use animo_core::entities::Entry;
use animo_core::report::InsightReport;
use animo_llm::{ChatClient, OpenAiClient};

use crate::aggregate::Aggregates;
use crate::beliefs::{BeliefExtractor, FallbackExtractor, HeuristicExtractor, select_extractor};
use crate::error::InsightError;
use crate::linker::{dedupe_beliefs, link_beliefs};
use crate::summary;

/// Builds [`InsightReport`]s. Holds no per-request state.
pub struct InsightEngine {
    extractor: FallbackExtractor,
    utc_offset: FixedOffset,
}

impl InsightEngine {
    /// Engine extracting with `extractor`, falling back to the heuristic when it fails.
    #[must_use]
    pub fn new(extractor: Arc<dyn BeliefExtractor>, utc_offset: FixedOffset) -> Self {
        Self {
            extractor: FallbackExtractor::new(extractor),
            utc_offset,
        }
    }

    /// Heuristic-only engine.
    #[must_use]
    pub fn heuristic(utc_offset: FixedOffset) -> Self {
        Self::new(Arc::new(HeuristicExtractor), utc_offset)
    }

    /// Engine from the `[analysis]` and `[llm]` sections. The model strategy is
    /// used when an API key is configured.
    ///
    /// # Errors
    ///
    /// `InsightError::Config` for an invalid offset, `InsightError::Llm` if the
    /// chat client cannot be built.
    pub fn from_config(analysis: &AnalysisConfig, llm: &LlmConfig) -> Result<Self, InsightError> {
        let client: Option<Arc<dyn ChatClient>> = if llm.is_configured() {
            Some(Arc::new(OpenAiClient::from_config(llm)?))
        } else {
            None
        };
        let extractor = select_extractor(client, llm.max_field_chars);
        tracing::info!(strategy = extractor.name(), "belief extraction configured");
        Ok(Self::new(extractor, analysis.utc_offset()?))
    }

    /// Name of the configured extraction strategy.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        self.extractor.primary_name()
    }

    /// Produce the report for `entries`. Extraction failures never surface here.
    pub async fn analyze(&self, entries: &[Entry]) -> InsightReport {
        let aggregates = Aggregates::compute(entries, self.utc_offset);

        let candidates = self.extractor.extract_or_heuristic(entries).await;
        let limiting_beliefs = dedupe_beliefs(link_beliefs(&candidates, entries));

        tracing::debug!(
            entries = aggregates.total,
            beliefs = limiting_beliefs.len(),
            "insight report assembled"
        );

        InsightReport {
            summary: summary::summarize(&aggregates),
            top_triggers: summary::top_triggers(&aggregates),
            patterns: summary::patterns(&aggregates),
            limiting_beliefs,
            automatisms: Vec::new(),
            recommendations: summary::recommendations(&aggregates),
        }
    }
}
