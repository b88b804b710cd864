/*
 * Responsibility
 * - 環境変数の読み込み (DATABASE_URL, 認証プロバイダの鍵, ページのパスなど)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - テストでは from_lookup() に HashMap を渡して env を汚さない
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Key material used to verify session tokens issued by the identity provider.
#[derive(Clone)]
pub enum SessionKey {
    /// HS256 shared secret (`AUTH_SECRET`)
    Secret(String),
    /// EdDSA public key in PEM (`AUTH_JWT_PUBLIC_KEY_PEM`)
    EdPublicPem(String),
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        match self {
            SessionKey::Secret(_) => f.write_str("SessionKey::Secret(..)"),
            SessionKey::EdPublicPem(_) => f.write_str("SessionKey::EdPublicPem(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: String,
    pub database_max_connections: u32,

    pub session_key: SessionKey,
    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_leeway_seconds: u64,
    pub session_cookie_name: String,
    pub auth_widget_script_url: Option<String>,

    pub sign_in_path: String,
    pub no_access_path: String,
    pub branch_gate_enabled: bool,

    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        // AUTH_SECRET wins when both are set
        let session_key = match (lookup("AUTH_SECRET"), lookup("AUTH_JWT_PUBLIC_KEY_PEM")) {
            (Some(secret), _) if !secret.trim().is_empty() => SessionKey::Secret(secret),
            (_, Some(pem)) if !pem.trim().is_empty() => {
                SessionKey::EdPublicPem(pem.replace("\\n", "\n"))
            }
            _ => return Err(ConfigError::Missing("AUTH_SECRET")),
        };

        let auth_issuer = lookup("AUTH_ISSUER").ok_or(ConfigError::Missing("AUTH_ISSUER"))?;

        let auth_audience = lookup("AUTH_AUDIENCE").ok_or(ConfigError::Missing("AUTH_AUDIENCE"))?;

        let auth_leeway_seconds = lookup("AUTH_LEEWAY_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let session_cookie_name =
            lookup("SESSION_COOKIE_NAME").unwrap_or_else(|| "session-token".to_string());

        let auth_widget_script_url = lookup("AUTH_WIDGET_SCRIPT_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let sign_in_path = local_path(lookup("SIGN_IN_PATH"), "/sign-in", "SIGN_IN_PATH")?;
        let no_access_path = local_path(lookup("NO_ACCESS_PATH"), "/no-access", "NO_ACCESS_PATH")?;
        if sign_in_path == no_access_path {
            return Err(ConfigError::Invalid("NO_ACCESS_PATH"));
        }

        let branch_gate_enabled = match lookup("BRANCH_GATE_ENABLED") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("BRANCH_GATE_ENABLED"))?,
            None => false,
        };

        let request_timeout_seconds = lookup("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(30);

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
            session_key,
            auth_issuer,
            auth_audience,
            auth_leeway_seconds,
            session_cookie_name,
            auth_widget_script_url,
            sign_in_path,
            no_access_path,
            branch_gate_enabled,
            request_timeout_seconds,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Routes mounted by build_router; a page path may not shadow them.
const RESERVED_PATHS: &[&str] = &["/", "/health", "/api"];

// Redirect targets must stay on this origin and must not clash with another route.
fn local_path(
    raw: Option<String>,
    default: &str,
    key: &'static str,
) -> Result<String, ConfigError> {
    let path = raw.unwrap_or_else(|| default.to_string());
    if !path.starts_with('/')
        || path.starts_with("//")
        || path.starts_with("/api/")
        || path.contains(['{', '}', '?', '#'])
        || RESERVED_PATHS.contains(&path.as_str())
    {
        return Err(ConfigError::Invalid(key));
    }
    Ok(path)
}
