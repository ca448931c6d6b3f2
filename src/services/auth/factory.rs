//! Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    tracing::debug!(
        leeway_seconds = config.jwt_leeway_seconds,
        "building access token verifier"
    );
    Arc::new(AuthService::new(
        config.jwt_secret.as_bytes(),
        config.jwt_leeway_seconds,
    ))
}
