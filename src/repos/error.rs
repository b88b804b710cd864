/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - NotFound と DB 障害を区別して返す (呼び出し側がまとめるかどうかを決める)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
