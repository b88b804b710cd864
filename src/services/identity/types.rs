/*
 * Responsibility
 * - Handler から見える「認証済み主体」の型
 * - identity provider が発行したものを読むだけ (このサービスでは作らない・変更しない)
 */
use chrono::{DateTime, Utc};

/// 認証済みリクエストに紐づく主体
///
/// - `id` は provider 側の subject。空文字にはならない (resolver が弾く)
/// - `rol` / `nombre` は provider が載せていない場合 `None`
/// - `expires_at` はセッショントークンの `exp`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub rol: Option<String>,
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rol: None,
            nombre: None,
            email: None,
            image: None,
            expires_at: None,
        }
    }

    /// nombre → email → id の順で表示名を選ぶ
    pub fn display_name(&self) -> &str {
        self.nombre
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}
