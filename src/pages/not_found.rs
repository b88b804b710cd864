/*
 * Responsibility
 * - fallback: どのルートにもマッチしなかったリクエスト
 * - パスに依存しない静的なメッセージ + dashboard への戻りリンク (失敗しない)
 */
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};

use super::layout::render;

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, not_found_page())
}

fn not_found_page() -> Html<String> {
    render(
        "Página no encontrada",
        "<main class=\"not-found\">\n\
         <h1>404</h1>\n\
         <p>La página que buscas no existe.</p>\n\
         <a href=\"/\">Volver al panel</a>\n\
         </main>",
    )
}
