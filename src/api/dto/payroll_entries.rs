/*
 * Responsibility
 * - PayrollEntry 削除の response DTO
 * - 失敗時の body は原因 (not found / DB 障害) を区別しない固定文言
 */
use serde::Serialize;

pub const DELETED_MESSAGE: &str = "Payroll entry deleted successfully";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete payroll entry";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessageResponse {
    pub error: String,
}
