/// Factory: build the identity resolver from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::identity::{IdentityError, IdentityResolver, JwtSessionResolver};

pub fn build_identity_resolver(
    config: &Config,
) -> Result<Arc<dyn IdentityResolver>, IdentityError> {
    let resolver = JwtSessionResolver::new(
        &config.session_key,
        &config.auth_issuer,
        &config.auth_audience,
        config.auth_leeway_seconds,
        config.session_cookie_name.clone(),
    )?;

    tracing::info!(
        cookie = %config.session_cookie_name,
        issuer = %config.auth_issuer,
        "session token resolver ready"
    );

    Ok(Arc::new(resolver))
}
