/*
 * Responsibility
 * - GET /api/me: report who the verified token belongs to
 * - the only input is AuthCtx, so this handler cannot run without the gate
 */
use axum::Json;

use crate::api::dto::me::MeResponse;
use crate::api::extractors::AuthCtxExtractor;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: ctx.user_id().to_string(),
    })
}
