//! Test doubles and helpers shared by the `#[cfg(test)]` modules.
//!
//! - session tokens are minted with the same HS256 secret the test resolver trusts
//! - repositories are in-memory; nothing here touches a real database

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, Response, StatusCode, header},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::app::{build_router, page_settings};
use crate::config::{AppEnv, Config, SessionKey};
use crate::repos::branch_repo::BranchDirectory;
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::payroll_entry_repo::PayrollEntryRepo;
use crate::services::gate::{AccessGate, BranchAssociationStage};
use crate::services::identity::{IdentityError, IdentityResolver, JwtSessionResolver, Principal};
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-session-secret";
pub const TEST_ISSUER: &str = "https://id.test.local";
pub const TEST_AUDIENCE: &str = "payroll-api";
pub const TEST_COOKIE: &str = "session-token";

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        database_url: "postgres://unused".into(),
        database_max_connections: 1,
        session_key: SessionKey::Secret(TEST_SECRET.into()),
        auth_issuer: TEST_ISSUER.into(),
        auth_audience: TEST_AUDIENCE.into(),
        auth_leeway_seconds: 0,
        session_cookie_name: TEST_COOKIE.into(),
        auth_widget_script_url: None,
        sign_in_path: "/sign-in".into(),
        no_access_path: "/no-access".into(),
        branch_gate_enabled: false,
        request_timeout_seconds: 5,
    }
}

pub fn test_resolver() -> JwtSessionResolver {
    JwtSessionResolver::new(
        &SessionKey::Secret(TEST_SECRET.into()),
        TEST_ISSUER,
        TEST_AUDIENCE,
        0,
        TEST_COOKIE,
    )
    .unwrap()
}

/// Claims the identity provider would put in a session token.
pub fn session_claims(sub: &str, rol: Option<&str>, nombre: Option<&str>) -> Value {
    let mut claims = json!({
        "sub": sub,
        "iss": TEST_ISSUER,
        "aud": TEST_AUDIENCE,
        "iat": chrono::Utc::now().timestamp(),
        "exp": chrono::Utc::now().timestamp() + 600,
        "email": format!("{sub}@example.com"),
    });
    if let Some(rol) = rol {
        claims["rol"] = json!(rol);
    }
    if let Some(nombre) = nombre {
        claims["nombre"] = json!(nombre);
    }
    claims
}

pub fn mint_token(claims: &Value) -> String {
    mint_token_with_secret(claims, TEST_SECRET)
}

pub fn mint_token_with_secret(claims: &Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[derive(Debug, Default)]
pub struct InMemoryPayrollEntryRepo {
    ids: Mutex<HashSet<String>>,
}

impl InMemoryPayrollEntryRepo {
    pub fn with_ids<const N: usize>(ids: [&str; N]) -> Self {
        Self {
            ids: Mutex::new(ids.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.lock().unwrap().contains(id)
    }
}

#[async_trait]
impl PayrollEntryRepo for InMemoryPayrollEntryRepo {
    async fn delete(&self, id: &str) -> RepoResult<()> {
        if self.ids.lock().unwrap().remove(id) {
            Ok(())
        } else {
            Err(RepoError::NotFound)
        }
    }
}

/// Behaves like an unreachable database.
pub struct FailingPayrollEntryRepo;

#[async_trait]
impl PayrollEntryRepo for FailingPayrollEntryRepo {
    async fn delete(&self, _id: &str) -> RepoResult<()> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }
}

#[derive(Debug, Default)]
pub struct StaticBranchDirectory {
    owners: HashSet<String>,
}

impl StaticBranchDirectory {
    pub fn with_owners<const N: usize>(owners: [&str; N]) -> Self {
        Self {
            owners: owners.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl BranchDirectory for StaticBranchDirectory {
    async fn has_any_branch(&self, principal_id: &str) -> RepoResult<bool> {
        Ok(self.owners.contains(principal_id))
    }
}

/// Provider that is down: every lookup fails.
pub struct FailingIdentityResolver;

#[async_trait]
impl IdentityResolver for FailingIdentityResolver {
    async fn resolve(&self, _headers: &HeaderMap) -> Result<Option<Principal>, IdentityError> {
        Err(IdentityError::InvalidKey("provider unavailable".into()))
    }
}

/// Provider that answers only after `delay`.
pub struct SlowIdentityResolver {
    pub delay: Duration,
}

#[async_trait]
impl IdentityResolver for SlowIdentityResolver {
    async fn resolve(&self, _headers: &HeaderMap) -> Result<Option<Principal>, IdentityError> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }
}

/// Branch lookup against an unreachable database.
pub struct FailingBranchDirectory;

#[async_trait]
impl BranchDirectory for FailingBranchDirectory {
    async fn has_any_branch(&self, _principal_id: &str) -> RepoResult<bool> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }
}

/// The real router wired to in-memory doubles.
pub struct TestApp {
    router: Router,
}

pub struct TestAppBuilder {
    config: Config,
    repo: Arc<dyn PayrollEntryRepo>,
    identity: Arc<dyn IdentityResolver>,
    branches: Option<Arc<dyn BranchDirectory>>,
}

impl TestAppBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn repo(mut self, repo: Arc<dyn PayrollEntryRepo>) -> Self {
        self.repo = repo;
        self
    }

    pub fn identity(mut self, identity: Arc<dyn IdentityResolver>) -> Self {
        self.identity = identity;
        self
    }

    pub fn branches(mut self, branches: Arc<dyn BranchDirectory>) -> Self {
        self.branches = Some(branches);
        self
    }

    pub fn build(self) -> TestApp {
        let config = self.config;

        let mut gate = AccessGate::new(config.sign_in_path.clone());
        if let Some(directory) = self.branches {
            gate = gate.with_stage(Arc::new(BranchAssociationStage::new(
                directory,
                config.no_access_path.clone(),
            )));
        }

        let state = AppState::new(
            self.repo,
            self.identity,
            Arc::new(gate),
            Arc::new(page_settings(&config)),
        );

        TestApp {
            router: build_router(state, &config),
        }
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            config: test_config(),
            repo: Arc::new(InMemoryPayrollEntryRepo::default()),
            identity: Arc::new(test_resolver()),
            branches: None,
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn with_repo(repo: Arc<dyn PayrollEntryRepo>) -> Self {
        Self::builder().repo(repo).build()
    }

    pub fn with_config(config: Config) -> Self {
        Self::builder().config(config).build()
    }

    pub fn with_branch_gate(directory: StaticBranchDirectory) -> Self {
        Self::builder().branches(Arc::new(directory)).build()
    }

    /// Sends a request; `token` is carried in the session cookie.
    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("{TEST_COOKIE}={token}"));
        }
        let req = builder.body(Body::empty()).unwrap();

        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn json(&self, method: Method, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let resp = self.request(method, uri, token).await;
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn text(&self, method: Method, uri: &str, token: Option<&str>) -> (StatusCode, String) {
        let resp = self.request(method, uri, token).await;
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}
