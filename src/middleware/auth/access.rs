//! Access token (HMAC JWT) verification -> put AuthCtx into request extensions.
//!
//! - `Authorization: Bearer <jwt>` and a bare `Authorization: <jwt>` are both accepted.
//! - Any rejection short-circuits with 401; the downstream handler never runs and
//!   the request is left untouched.
//! - Verification detail goes to the log only, never the raw token.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AuthError;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Put the auth gate in front of every route of `router`.
///
/// ```ignore
/// let protected = api::routes::protected();
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// app = app.nest("/api", protected);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // from_fn cannot see the router state; hand it over with from_fn_with_state.
    // route_layer: unmatched paths stay 404 instead of turning into 401.
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Pull the raw token out of the `Authorization` header.
///
/// A header that is present but not visible ASCII cannot carry a valid token,
/// so it is reported as `InvalidToken` rather than as missing.
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?;

    let auth = value.to_str().map_err(|_| {
        tracing::warn!("authorization header is not valid ascii");
        AuthError::InvalidToken
    })?;

    let token = auth.strip_prefix(BEARER_PREFIX).unwrap_or(auth);

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = match extract_token(req.headers()) {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(reason = %err, "request rejected by auth gate");
            return Err(err);
        }
    };

    let verified = match state.auth.verify_verified(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "access token verification failed"
            );
            return Err(AuthError::InvalidToken);
        }
    };

    tracing::debug!(user_id = %verified.user_id, "access token verified");

    // middleware -> extractor
    req.extensions_mut().insert(AuthCtx::new(verified.user_id));

    Ok(next.run(req).await)
}
