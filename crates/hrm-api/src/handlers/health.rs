//! Liveness check

use axum::Json;
use serde_json::{json, Value};

/// Health handler - GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "hrm-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
