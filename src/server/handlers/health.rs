//! Liveness endpoints.

use axum::Json;
use serde_json::{json, Value};

/// Plain-text banner at `/`.
pub async fn root() -> &'static str {
    "Server is up and running!"
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
