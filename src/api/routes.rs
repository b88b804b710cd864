/*
 * Responsibility
 * - /api の URL 構造を定義
 * - /payroll-entries/{id} (DELETE), /auth/session (GET)
 * - どちらも gate の外 (gate は画面系ルートのみ)
 */
use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use crate::api::handlers::{payroll_entries::delete_payroll_entry, session::get_session};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payroll-entries/{id}", delete(delete_payroll_entry))
        .route("/auth/session", get(get_session))
}
