use thiserror::Error;

/// Errors from chat-completion calls.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("chat request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("chat response had no message content")]
    EmptyResponse,

    #[error("chat client not configured: {0}")]
    NotConfigured(String),
}
