use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::Deserialize;

use animo_core::range::{TimeRange, now_ms};
use animo_core::report::InsightsResponse;
use animo_insights::{InlineRecord, lenient_records, normalize_records};

use crate::error::{ANALYZE_FAILED, ApiError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RangeBounds {
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub to: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub range: Option<RangeBounds>,
    /// Client-side records, used only when the store has none in range.
    /// Malformed records are skipped.
    #[serde(default, deserialize_with = "lenient_records")]
    pub records: Vec<InlineRecord>,
}

fn parse_request(body: &[u8]) -> Result<AnalyzeRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AnalyzeRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("invalid body: {e}")))
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InsightsResponse>, ApiError> {
    let user = state.authenticate(&headers).await?;
    let request = parse_request(&body)?;

    let now = now_ms();
    let bounds = request.range.unwrap_or_default();
    let range = TimeRange::resolve(bounds.from, bounds.to, now, state.default_range_days)?;

    let mut entries = state.store.fetch(&user.user_id, range).await.map_err(|error| {
        tracing::error!(%error, "entry fetch failed");
        ApiError::Internal(ANALYZE_FAILED.to_string())
    })?;
    if entries.is_empty() && !request.records.is_empty() {
        entries = normalize_records(&request.records, now);
        tracing::debug!(records = entries.len(), "analyzing inline records");
    }

    let insights = state.engine.analyze(&entries).await;
    tracing::info!(
        entries = entries.len(),
        beliefs = insights.limiting_beliefs.len(),
        "insight report served"
    );
    Ok(Json(InsightsResponse { insights }))
}
