use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::error_log::ErrorLogService;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(service): State<Arc<ErrorLogService>>) -> impl IntoResponse {
    if service.is_ready().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "database": "connected",
                "store": service.backend()
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "database": "disconnected",
                "store": service.backend()
            })),
        )
    }
}
