use async_trait::async_trait;

use animo_core::identity::AuthIdentity;

use crate::error::AuthError;

/// Resolves bearer tokens to users and manages provider-side accounts.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify `token` and return the identity it belongs to.
    async fn verify(&self, token: &str) -> Result<AuthIdentity, AuthError>;

    /// Remove the account of `user_id` from the provider.
    async fn delete_user(&self, user_id: &str) -> Result<(), AuthError>;
}
