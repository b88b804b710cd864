/*
 * Responsibility
 * - DELETE /api/payroll-entries/{id}
 * - id は不透明な文字列としてそのまま repo に渡す
 * - 失敗は原因を問わずログに残して 500 + 固定文言 (not found も 404 にはしない)
 * - path の decode 失敗 (不正な percent-encoding 等) も同じ 500 にそろえる
 */
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};

use crate::{
    api::dto::payroll_entries::{
        DELETE_FAILED_MESSAGE, DELETED_MESSAGE, ErrorMessageResponse, MessageResponse,
    },
    repos::error::RepoError,
    state::AppState,
};

type DeleteError = (StatusCode, Json<ErrorMessageResponse>);

fn delete_failed() -> DeleteError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorMessageResponse {
            error: DELETE_FAILED_MESSAGE.to_string(),
        }),
    )
}

pub async fn delete_payroll_entry(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, DeleteError> {
    let Path(id) = path.map_err(|rejection| {
        tracing::warn!(error = %rejection, "payroll entry id could not be decoded");
        delete_failed()
    })?;

    state.payroll_entries.delete(&id).await.map_err(|err| {
        // callers cannot tell "already deleted" from "database unavailable";
        // the logs can.
        match &err {
            RepoError::NotFound => {
                tracing::warn!(payroll_entry_id = %id, "payroll entry not found on delete")
            }
            RepoError::Db(e) => {
                tracing::error!(payroll_entry_id = %id, error = %e, "payroll entry delete failed")
            }
        }
        delete_failed()
    })?;

    tracing::info!(payroll_entry_id = %id, "payroll entry deleted");

    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::testing::{FailingPayrollEntryRepo, InMemoryPayrollEntryRepo, TestApp};

    #[tokio::test]
    async fn deleting_existing_entry_returns_message() {
        let repo = Arc::new(InMemoryPayrollEntryRepo::with_ids(["pe_1", "pe_2"]));
        let app = TestApp::with_repo(repo.clone());

        let (status, body) = app
            .json(Method::DELETE, "/api/payroll-entries/pe_1", None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Payroll entry deleted successfully"}));
        assert!(!repo.contains("pe_1"));
        assert!(repo.contains("pe_2"));
    }

    #[tokio::test]
    async fn deleting_same_entry_twice_fails_the_second_time() {
        let repo = Arc::new(InMemoryPayrollEntryRepo::with_ids(["pe_1"]));
        let app = TestApp::with_repo(repo);

        let (first, _) = app
            .json(Method::DELETE, "/api/payroll-entries/pe_1", None)
            .await;
        let (second, body) = app
            .json(Method::DELETE, "/api/payroll-entries/pe_1", None)
            .await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to delete payroll entry"}));
    }

    #[tokio::test]
    async fn deleting_unknown_entry_is_a_generic_500_not_a_404() {
        let app = TestApp::with_repo(Arc::new(InMemoryPayrollEntryRepo::default()));

        let (status, body) = app
            .json(Method::DELETE, "/api/payroll-entries/does-not-exist", None)
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to delete payroll entry"}));
    }

    #[tokio::test]
    async fn database_failure_looks_the_same_as_not_found() {
        let app = TestApp::with_repo(Arc::new(FailingPayrollEntryRepo));

        let (status, body) = app
            .json(Method::DELETE, "/api/payroll-entries/pe_1", None)
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to delete payroll entry"}));
    }

    #[tokio::test]
    async fn undecodable_id_gets_the_generic_error_body() {
        let repo = Arc::new(InMemoryPayrollEntryRepo::with_ids(["pe_1"]));
        let app = TestApp::with_repo(repo.clone());

        let (status, body) = app
            .json(Method::DELETE, "/api/payroll-entries/%FF", None)
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to delete payroll entry"}));
        assert!(repo.contains("pe_1"));
    }

    #[tokio::test]
    async fn delete_does_not_require_a_session() {
        let repo = Arc::new(InMemoryPayrollEntryRepo::with_ids(["pe_9"]));
        let app = TestApp::with_repo(repo);

        let (status, _) = app
            .json(Method::DELETE, "/api/payroll-entries/pe_9", None)
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}
