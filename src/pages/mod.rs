/*
 * Responsibility
 * - 画面系ルート (sign-in / no-access / dashboard / not-found)
 * - 見た目は最小限のサーバーレンダリング HTML (UI コンポーネントやスタイルは持たない)
 * - dashboard だけ access gate の内側に置く
 */
use axum::{Router, routing::get};

use crate::middleware;
use crate::state::AppState;

mod dashboard;
mod layout;
mod no_access;
mod not_found;
mod sign_in;

pub use not_found::not_found;

/// Page-level settings derived from `Config`.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub sign_in_path: String,
    pub no_access_path: String,
    pub auth_widget_script_url: Option<String>,
}

/// Public pages (no gate).
pub fn routes(settings: &PageSettings) -> Router<AppState> {
    Router::new()
        .route(&settings.sign_in_path, get(sign_in::sign_in))
        .route(&settings.no_access_path, get(no_access::no_access))
}

/// Dashboard pages; every route here runs behind the access gate.
pub fn dashboard_routes(state: AppState) -> Router<AppState> {
    let router = Router::new().route("/", get(dashboard::dashboard));
    middleware::auth::gate::apply(router, state)
}
