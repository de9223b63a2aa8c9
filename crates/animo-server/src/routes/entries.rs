use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;

use animo_core::entities::{Entry, NewEntry};
use animo_core::range::{TimeRange, now_ms};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<EntriesQuery>, QueryRejection>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    let user = state.authenticate(&headers).await?;
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let range = TimeRange::new(query.from.unwrap_or(0), query.to.unwrap_or_else(now_ms))?;
    let entries = state.store.fetch(&user.user_id, range).await?;
    tracing::debug!(count = entries.len(), "entries listed");
    Ok(Json(entries))
}

pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let user = state.authenticate(&headers).await?;
    let Json(new_entry) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let entry = state.store.insert(&user.user_id, &new_entry).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
