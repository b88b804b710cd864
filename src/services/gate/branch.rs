use std::sync::Arc;

use async_trait::async_trait;

use super::{GateDecision, GateError, GateStage};
use crate::repos::branch_repo::BranchDirectory;
use crate::services::identity::Principal;

/// Principal must own at least one branch association, otherwise redirect to
/// the no-access page.
///
/// Only "at least one" is checked; which branch is selected afterwards is not
/// this stage's concern.
pub struct BranchAssociationStage {
    directory: Arc<dyn BranchDirectory>,
    no_access_path: String,
}

impl BranchAssociationStage {
    pub fn new(directory: Arc<dyn BranchDirectory>, no_access_path: impl Into<String>) -> Self {
        Self {
            directory,
            no_access_path: no_access_path.into(),
        }
    }
}

#[async_trait]
impl GateStage for BranchAssociationStage {
    fn name(&self) -> &'static str {
        "branch_association"
    }

    async fn check(&self, principal: &Principal) -> Result<GateDecision, GateError> {
        let has_branch = self
            .directory
            .has_any_branch(&principal.id)
            .await
            .map_err(|source| GateError::Lookup {
                stage: self.name(),
                source,
            })?;

        if has_branch {
            Ok(GateDecision::Continue)
        } else {
            Ok(GateDecision::Redirect(self.no_access_path.clone()))
        }
    }
}
