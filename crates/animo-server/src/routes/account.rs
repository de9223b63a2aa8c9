use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::{Value, json};

use animo_auth::AuthError;

use crate::error::ApiError;
use crate::state::AppState;

/// Delete the caller's entries, then their identity-provider account.
pub async fn delete_me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let user = state.authenticate(&headers).await?;

    let removed = state.store.delete_for_user(&user.user_id).await?;
    match state.identity.delete_user(&user.user_id).await {
        Ok(()) => {}
        Err(AuthError::NotConfigured(reason)) => {
            tracing::warn!(%reason, "account kept at identity provider");
        }
        Err(error) => return Err(error.into()),
    }

    tracing::info!(removed, "account deleted");
    Ok(Json(json!({ "ok": true })))
}
