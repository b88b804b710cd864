use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::identity::Principal;

/// Outcome of one gate stage (or of the whole gate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(String),
}

#[derive(Debug, Error)]
pub enum GateError {
    #[error("gate stage '{stage}' lookup failed: {source}")]
    Lookup {
        stage: &'static str,
        #[source]
        source: RepoError,
    },
}

/// An authorization stage that runs after authentication succeeded.
#[async_trait]
pub trait GateStage: Send + Sync {
    // Stage name (for logging).
    fn name(&self) -> &'static str;

    async fn check(&self, principal: &Principal) -> Result<GateDecision, GateError>;
}

/// Two-stage gate: authenticated? then every configured stage in order.
#[derive(Clone)]
pub struct AccessGate {
    sign_in_path: String,
    stages: Vec<Arc<dyn GateStage>>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self.stages.iter().map(|s| s.name()).collect();
        f.debug_struct("AccessGate")
            .field("sign_in_path", &self.sign_in_path)
            .field("stages", &names)
            .finish()
    }
}

impl AccessGate {
    pub fn new(sign_in_path: impl Into<String>) -> Self {
        Self {
            sign_in_path: sign_in_path.into(),
            stages: Vec::new(),
        }
    }

    pub fn with_stage(mut self, stage: Arc<dyn GateStage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// `requested` is the path+query the client asked for; it is carried to the
    /// sign-in page as `callbackUrl`.
    pub async fn evaluate(
        &self,
        principal: Option<&Principal>,
        requested: &str,
    ) -> Result<GateDecision, GateError> {
        let Some(principal) = principal else {
            return Ok(GateDecision::Redirect(self.sign_in_redirect(requested)));
        };

        for stage in &self.stages {
            let decision = stage.check(principal).await?;
            if let GateDecision::Redirect(target) = decision {
                tracing::info!(
                    stage = stage.name(),
                    principal_id = %principal.id,
                    target = %target,
                    "access gate redirect"
                );
                return Ok(GateDecision::Redirect(target));
            }
        }

        Ok(GateDecision::Continue)
    }

    fn sign_in_redirect(&self, requested: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("callbackUrl", requested)
            .finish();
        format!("{}?{}", self.sign_in_path, query)
    }
}
