mod account;
mod analyze;
mod entries;
mod health;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub use analyze::{AnalyzeRequest, RangeBounds};
pub use health::HealthResponse;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/analyze", post(analyze::analyze))
        .route(
            "/api/entries",
            get(entries::list_entries).post(entries::create_entry),
        )
        .route("/api/me", delete(account::delete_me))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
