//! Identity provider (Supabase-compatible auth API) configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Project base URL (e.g., `https://abcd.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Public (anon) API key used to verify user tokens.
    #[serde(default)]
    pub anon_key: String,

    /// Service-role key, required only for deleting accounts.
    #[serde(default)]
    pub service_role_key: String,
}

impl AuthConfig {
    /// Check if tokens can be verified.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// Check if accounts can be deleted through the admin API.
    pub fn can_delete_users(&self) -> bool {
        self.is_configured() && !self.service_role_key.is_empty()
    }
}
