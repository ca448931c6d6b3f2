/*
 * Responsibility
 * - GET /        liveness text for the hosting platform's health check
 * - GET /api/health  JSON health (not behind the auth gate)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn root() -> &'static str {
    "Gaushala Backend is live and working!"
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
