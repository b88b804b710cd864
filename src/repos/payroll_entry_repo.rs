/*
 * Responsibility
 * - payroll_entries テーブル向け SQLx 操作
 * - 削除は物理削除 (soft delete / tombstone なし)
 * - 0 行削除は RepoError::NotFound として返す
 */
use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::error::{RepoError, RepoResult};

#[async_trait]
pub trait PayrollEntryRepo: Send + Sync {
    /// Hard delete by id. A second call with the same id returns `NotFound`.
    async fn delete(&self, id: &str) -> RepoResult<()>;
}

#[derive(Clone, Debug)]
pub struct PgPayrollEntryRepo {
    db: PgPool,
}

impl PgPayrollEntryRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PayrollEntryRepo for PgPayrollEntryRepo {
    async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM payroll_entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
