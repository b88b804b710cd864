/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth: identity 解決 → access gate
 * - http / security_headers: 全ルート共通の横断的関心事
 */
pub mod auth;
pub mod http;
pub mod security_headers;
