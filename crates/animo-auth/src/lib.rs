//! # animo-auth
//!
//! Bearer-token identity verification for Animo.
//!
//! - `bearer`: `Authorization` header parsing
//! - `provider`: the `IdentityProvider` seam used by the HTTP layer
//! - `supabase`: a Supabase-compatible auth API client

pub mod bearer;
pub mod error;
pub mod provider;
pub mod supabase;

pub use bearer::bearer_token;
pub use error::AuthError;
pub use provider::IdentityProvider;
pub use supabase::SupabaseAuth;

/// Resolve an `Authorization` header value to an identity.
///
/// # Errors
///
/// `AuthError::MissingToken` when no bearer token is present, otherwise any
/// error from the provider.
pub async fn authenticate(
    provider: &dyn IdentityProvider,
    header: Option<&str>,
) -> Result<animo_core::identity::AuthIdentity, AuthError> {
    let token = bearer_token(header)?;
    provider.verify(token).await
}
