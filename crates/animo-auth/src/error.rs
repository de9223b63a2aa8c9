use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("identity provider error: {0}")]
    Provider(String),

    #[error("identity provider not configured: {0}")]
    NotConfigured(String),
}
