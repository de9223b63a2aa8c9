//! # animo-llm
//!
//! A minimal chat-completion seam. The insights pipeline only needs one
//! system prompt and one user prompt in, the assistant's text out.

pub mod error;
pub mod openai;

use async_trait::async_trait;

pub use error::LlmError;
pub use openai::OpenAiClient;

/// One chat-completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    /// Ask the endpoint to return a JSON object.
    pub json_response: bool,
}

impl ChatRequest {
    /// Deterministic request expecting a JSON object back.
    #[must_use]
    pub fn json(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.0,
            json_response: true,
        }
    }
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `request` and return the assistant message content.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}
