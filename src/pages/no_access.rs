/*
 * Responsibility
 * - GET /no-access: 認証済みだが利用権限 (branch の紐付け) がない場合の画面
 * - 静的な拒否メッセージ + 通知 (toast) 用の領域
 */
use axum::response::Html;

use super::layout::render;

pub async fn no_access() -> Html<String> {
    render(
        "Sin acceso",
        "<main class=\"no-access\">\n\
         <h1>Sin acceso</h1>\n\
         <p>Tu usuario no tiene una sucursal asignada. Contacta al administrador.</p>\n\
         </main>\n\
         <div id=\"toaster\" role=\"status\" aria-live=\"polite\"></div>",
    )
}
