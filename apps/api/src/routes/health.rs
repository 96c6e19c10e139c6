use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Public liveness probe.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "extension-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /api/health
/// Kept alongside /health because the extension probes both.
pub async fn api_health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "api": "running",
        "cors": "enabled",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
