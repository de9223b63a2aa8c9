use thiserror::Error;

use animo_config::ConfigError;
use animo_llm::LlmError;

/// Errors building an [`InsightEngine`](crate::InsightEngine) from configuration.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}
