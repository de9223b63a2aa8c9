//! # animo-server
//!
//! axum HTTP API over the entry store, the identity provider, and the
//! insight engine.
//!
//! | Route | Method | Purpose |
//! |-------|--------|---------|
//! | `/health` | GET | liveness and version |
//! | `/api/analyze` | POST | insight report for a time range |
//! | `/api/entries` | GET, POST | list and create entries |
//! | `/api/me` | DELETE | delete the caller's data and account |

pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

/// Bind `addr` and serve until the process stops.
///
/// # Errors
///
/// Returns the I/O error if binding or serving fails.
pub async fn serve(addr: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("animo server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
