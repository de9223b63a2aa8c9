//! Cross-cutting error types for Animo.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `AuthError`) are defined in
//! their respective crates. They converge in `animo-server` (as HTTP responses)
//! and `animo-cli` (as `anyhow` reports).

use thiserror::Error;

/// Errors that can be raised by any Animo crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (ranges, required fields, formats).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
