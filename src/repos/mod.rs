/*
 * Responsibility
 * - 永続化クライアント (PostgreSQL / sqlx) への窓口
 * - trait を境界にして handler / service からは実装を意識させない
 */
pub mod branch_repo;
pub mod error;
pub mod payroll_entry_repo;
