/*
 * Responsibility
 * - GET /sign-in: identity provider のサインインウィジェットを埋め込むだけ
 * - callbackUrl は同一オリジンのパスだけ受け付ける (open redirect 防止)
 */
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use super::layout::{escape_html, local_redirect_target, render};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignInQuery {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

pub async fn sign_in(
    State(state): State<AppState>,
    Query(query): Query<SignInQuery>,
) -> Html<String> {
    let callback = escape_html(local_redirect_target(query.callback_url.as_deref()));

    let widget = match &state.pages.auth_widget_script_url {
        Some(src) => format!(
            "<div id=\"sign-in\" data-callback-url=\"{callback}\"></div>\n\
             <script src=\"{}\" defer></script>",
            escape_html(src)
        ),
        None => format!(
            "<div id=\"sign-in\" data-callback-url=\"{callback}\">\n\
             <p>El proveedor de identidad no está configurado.</p>\n\
             </div>"
        ),
    };

    render(
        "Iniciar sesión",
        &format!("<main class=\"sign-in\">\n<h1>Iniciar sesión</h1>\n{widget}\n</main>"),
    )
}
