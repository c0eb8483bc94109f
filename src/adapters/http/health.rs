//! GET /health - storage reachability.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::ports::StorageHealth;

/// Creates the health router.
pub fn health_routes(storage: Arc<dyn StorageHealth>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(storage)
}

async fn health(State(storage): State<Arc<dyn StorageHealth>>) -> impl IntoResponse {
    match storage.check().await {
        Ok(backend) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "storage": backend })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": "storage unreachable" })),
            )
        }
    }
}
