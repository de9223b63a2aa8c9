//! Supabase-compatible auth API client.
//!
//! Token verification calls `GET {url}/auth/v1/user` with the anon key;
//! account removal calls `DELETE {url}/auth/v1/admin/users/{id}` with the
//! service-role key.

use async_trait::async_trait;
use reqwest::StatusCode;

use animo_config::AuthConfig;
use animo_core::identity::AuthIdentity;

use crate::error::AuthError;
use crate::provider::IdentityProvider;

pub struct SupabaseAuth {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_role_key: Option<String>,
}

impl SupabaseAuth {
    /// Build a client from the `[auth]` config section.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotConfigured` if the URL or anon key is missing.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        if !config.is_configured() {
            return Err(AuthError::NotConfigured(
                "set auth.url and auth.anon_key".into(),
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            service_role_key: config
                .can_delete_users()
                .then(|| config.service_role_key.clone()),
        })
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn verify(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("verify token: {e}")))?;

        let status = response.status();
        if status.is_client_error() {
            tracing::debug!(%status, "token rejected by identity provider");
            return Err(AuthError::InvalidToken);
        }
        let response = response
            .error_for_status()
            .map_err(|e| AuthError::Provider(format!("verify token: {e}")))?;

        response
            .json::<AuthIdentity>()
            .await
            .map_err(|e| AuthError::Provider(format!("parse user: {e}")))
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), AuthError> {
        let service_key = self.service_role_key.as_deref().ok_or_else(|| {
            AuthError::NotConfigured("set auth.service_role_key to delete accounts".into())
        })?;

        let response = self
            .client
            .delete(format!("{}/auth/v1/admin/users/{user_id}", self.base_url))
            .header("apikey", service_key)
            .bearer_auth(service_key)
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("delete user: {e}")))?;

        // Already gone counts as deleted.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        response
            .error_for_status()
            .map_err(|e| AuthError::Provider(format!("delete user: {e}")))?;
        tracing::info!("identity provider account deleted");
        Ok(())
    }
}
