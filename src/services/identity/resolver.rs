use async_trait::async_trait;
use axum::http::HeaderMap;
use thiserror::Error;

use super::Principal;

/// Identity provider failures.
///
/// A missing or unverifiable session is NOT an error: resolvers return `Ok(None)`.
/// Only failures of the provider itself end up here, and callers are expected
/// to fail the request (no retry).
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid identity provider key: {0}")]
    InvalidKey(String),

    #[error("identity provider error: {0}")]
    Provider(#[from] jsonwebtoken::errors::Error),
}

/// Resolves the authenticated principal of the current request.
///
/// Returns:
/// - `Ok(Some(_))` => authenticated
/// - `Ok(None)`    => no session (normal outcome)
/// - `Err(_)`      => provider failure
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Principal>, IdentityError>;
}
