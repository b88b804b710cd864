/*
 * Responsibility
 * - GET /api/auth/session
 * - 現在のリクエストのセッション (id / rol / nombre 付き) を返す
 * - セッションがなければ 200 + null (エラーではない)
 */
use axum::{Json, extract::State, http::HeaderMap};

use crate::{api::dto::session::SessionResponse, error::AppError, state::AppState};

pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Option<SessionResponse>>, AppError> {
    let principal = state.identity.resolve(&headers).await?;

    Ok(Json(principal.map(SessionResponse::from)))
}
