//! Security-related response headers.
//!
//! Pages are plain server-rendered HTML, so the policy is strict:
//! - no framing (clickjacking)
//! - no MIME sniffing
//! - referrer limited to the origin on cross-site navigation
//! - HSTS only in production (development runs on plain http)

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::Config;

fn static_headers() -> [(&'static str, &'static str); 5] {
    [
        ("x-frame-options", "DENY"),
        ("content-security-policy", "frame-ancestors 'none'"),
        ("x-content-type-options", "nosniff"),
        ("referrer-policy", "strict-origin-when-cross-origin"),
        (
            "permissions-policy",
            "camera=(), microphone=(), geolocation=()",
        ),
    ]
}

pub fn apply(router: Router, config: &Config) -> Router {
    let mut router = static_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        });

    if config.app_env.is_production() {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("strict-transport-security"),
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        ));
    }

    router
}
