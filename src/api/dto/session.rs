/*
 * Responsibility
 * - セッション (拡張済み) の response DTO
 * - user には id / rol / nombre を必ずキーとして載せる (provider が省略したら null)
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::identity::Principal;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: SessionUser,
    pub expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub rol: Option<String>,
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

impl From<Principal> for SessionResponse {
    fn from(p: Principal) -> Self {
        Self {
            user: SessionUser {
                id: p.id,
                rol: p.rol,
                nombre: p.nombre,
                email: p.email,
                image: p.image,
            },
            expires: p.expires_at,
        }
    }
}
