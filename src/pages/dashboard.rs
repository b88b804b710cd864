/*
 * Responsibility
 * - GET /: dashboard のルート
 * - gate を通過した後にしか呼ばれない (CurrentPrincipal が必ず入っている)
 */
use axum::response::Html;

use super::layout::{escape_html, render};
use crate::api::extractors::CurrentPrincipal;

pub async fn dashboard(CurrentPrincipal(principal): CurrentPrincipal) -> Html<String> {
    let rol = principal
        .rol
        .as_deref()
        .map(|r| format!("<p class=\"rol\">{}</p>\n", escape_html(r)))
        .unwrap_or_default();

    render(
        "Panel",
        &format!(
            "<main class=\"dashboard\">\n<h1>Hola, {}</h1>\n{rol}</main>",
            escape_html(principal.display_name())
        ),
    )
}
