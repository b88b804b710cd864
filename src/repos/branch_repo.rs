/*
 * Responsibility
 * - principal と branch (テナント) の紐付けの有無を調べる
 * - access gate の branch 段からのみ使う (BRANCH_GATE_ENABLED=true のとき)
 */
use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::error::RepoResult;

#[async_trait]
pub trait BranchDirectory: Send + Sync {
    /// `true` if the principal owns at least one branch association.
    async fn has_any_branch(&self, principal_id: &str) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgBranchDirectory {
    db: PgPool,
}

impl PgBranchDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BranchDirectory for PgBranchDirectory {
    async fn has_any_branch(&self, principal_id: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM branches
                WHERE "ownerId" = $1
            )
            "#,
        )
        .bind(principal_id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }
}
