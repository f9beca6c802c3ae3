//! Health check endpoint.

use axum::Json;
use serde_json::{Value, json};

/// Liveness probe. Returns 200 as long as the process is serving requests.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
