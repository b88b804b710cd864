use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use chrono::DateTime;
use cookie::Cookie;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;

use super::{IdentityError, IdentityResolver, Principal};
use crate::config::SessionKey;

/// Session token claims as issued by the identity provider.
///
/// NOTE:
/// - `rol` / `nombre` are custom claims added by the provider's session callback.
/// - `name` is the standard profile claim; used when `nombre` is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: i64,

    #[serde(default)]
    pub rol: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl SessionClaims {
    fn into_principal(self) -> Principal {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let mut principal = Principal::new(self.sub);
        principal.rol = non_empty(self.rol);
        principal.nombre = non_empty(self.nombre).or_else(|| non_empty(self.name));
        principal.email = non_empty(self.email);
        principal.image = non_empty(self.picture);
        principal.expires_at = DateTime::from_timestamp(self.exp, 0);
        principal
    }
}

/// Resolves the principal from a self-contained signed session token.
///
/// Lookup order:
/// 1. session cookie (`SESSION_COOKIE_NAME`)
/// 2. `Authorization: Bearer <token>`
///
/// No server-side session store is consulted.
#[derive(Clone)]
pub struct JwtSessionResolver {
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_name: String,
}

impl std::fmt::Debug for JwtSessionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtSessionResolver")
            .field("validation", &self.validation)
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

impl JwtSessionResolver {
    pub fn new(
        key: &SessionKey,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
        cookie_name: impl Into<String>,
    ) -> Result<Self, IdentityError> {
        let (decoding_key, algorithm) = match key {
            SessionKey::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
            SessionKey::EdPublicPem(pem) => (
                DecodingKey::from_ed_pem(pem.as_bytes())
                    .map_err(|e| IdentityError::InvalidKey(e.to_string()))?,
                Algorithm::EdDSA,
            ),
        };

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
            cookie_name: cookie_name.into(),
        })
    }

    // Verify and decode a session token.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    fn extract_token(&self, headers: &HeaderMap) -> Option<String> {
        session_cookie(headers, &self.cookie_name).or_else(|| bearer_token(headers))
    }
}

#[async_trait]
impl IdentityResolver for JwtSessionResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Principal>, IdentityError> {
        let Some(token) = self.extract_token(headers) else {
            return Ok(None);
        };

        let claims = match self.verify(&token) {
            Ok(claims) => claims,
            // A broken key is the provider's fault, not the client's.
            Err(err) if matches!(err.kind(), ErrorKind::InvalidKeyFormat) => {
                return Err(IdentityError::Provider(err));
            }
            Err(err) => {
                tracing::debug!(error = %err, "session token rejected");
                return Ok(None);
            }
        };

        if claims.sub.trim().is_empty() {
            tracing::debug!("session token has an empty subject");
            return Ok(None);
        }

        Ok(Some(claims.into_principal()))
    }
}

// Later headers win over earlier ones for the same cookie name.
fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| Cookie::split_parse(raw).filter_map(Result::ok))
        .filter(|cookie| cookie.name() == name && !cookie.value().is_empty())
        .last()
        .map(|cookie| cookie.value().to_string())
}

// The auth scheme is case-insensitive (RFC 9110 §11.1).
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
