use std::sync::Arc;

use axum::http::{HeaderMap, header};

use animo_auth::IdentityProvider;
use animo_core::identity::AuthIdentity;
use animo_db::EntryStore;
use animo_insights::InsightEngine;

use crate::error::ApiError;

/// Shared collaborators for every request.
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub engine: Arc<InsightEngine>,
    /// Length of the analysis window when the request gives no start.
    pub default_range_days: u32,
}

impl AppState {
    /// Verify the request's bearer token.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` for a missing or rejected token.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthIdentity, ApiError> {
        let header = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        Ok(animo_auth::authenticate(self.identity.as_ref(), header).await?)
    }
}
