use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lightweight authenticated user identity for cross-crate passing.
///
/// Produced by `animo-auth` after a bearer token is verified, consumed by the
/// server handlers to scope every storage call to one user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthIdentity {
    /// Identity-provider user ID.
    #[serde(rename = "id")]
    pub user_id: String,
    /// Email on record, when the provider exposes it.
    pub email: Option<String>,
}
