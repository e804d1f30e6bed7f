//! HTTP adapters - REST API implementations.

pub mod subscription;

use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub use subscription::{subscription_router, SubscriptionAppState};

/// GET /health - liveness probe, unauthenticated.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
