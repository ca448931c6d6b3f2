/*
 * Responsibility
 * - URL layout under /api
 * - public(): reachable without a token
 * - protected(): app.rs wraps it with the auth gate before nesting
 */
use axum::{Router, routing::get};

use crate::api::handlers::{health::health, me::me};
use crate::state::AppState;

pub fn public() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn protected() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
