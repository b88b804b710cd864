//! identity 解決 → access gate → (続行 | リダイレクト)
//!
//! - Principal が解決できなければ sign-in へリダイレクトし、handler は実行しない
//! - gate の段 (branch など) が Redirect を返したらそこで打ち切る
//! - 続行時は Principal を request extensions に入れる (handler は CurrentPrincipal で受け取る)
//! - provider / gate の障害はここでは回復しない (500)

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};

use crate::error::AppError;
use crate::services::gate::GateDecision;
use crate::state::AppState;

/// 画面系ルートに gate を掛ける。
///
/// 例：
/// ```ignore
/// let dashboard = Router::new().route("/", get(dashboard));
/// let dashboard = middleware::auth::gate::apply(dashboard, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: マッチしたルートにだけ掛ける (fallback の not-found は素通し)
    router.route_layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn gate_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let principal = state.identity.resolve(req.headers()).await?;

    let requested = original_uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    match state.gate.evaluate(principal.as_ref(), requested).await? {
        GateDecision::Redirect(target) => {
            tracing::debug!(
                requested = %requested,
                target = %target,
                authenticated = principal.is_some(),
                "gate redirect"
            );
            return Ok(Redirect::temporary(&target).into_response());
        }
        GateDecision::Continue => {}
    }

    // Continue implies a principal; the gate never lets an anonymous request through.
    let principal = principal.ok_or(AppError::Unauthorized)?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
