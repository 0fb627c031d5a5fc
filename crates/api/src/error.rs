//! Error to HTTP response mapping.
//!
//! Client errors carry `{"error": <code>, "message": <text>}`. Server errors
//! are logged and answered with a generic body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use reimburse_core::ExpenseError;
use reimburse_shared::AppError;

fn error_response(status: u16, code: &str, message: String) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %message, "Request failed");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response();
    }

    (
        status,
        Json(json!({
            "error": code,
            "message": message
        })),
    )
        .into_response()
}

/// Maps an expense error to its HTTP response.
pub fn map_expense_error(e: &ExpenseError) -> Response {
    error_response(e.status_code(), e.error_code(), e.to_string())
}

/// Maps an application error to its HTTP response.
pub fn map_app_error(e: &AppError) -> Response {
    error_response(e.status_code(), e.error_code(), e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use reimburse_core::StoreError;
    use reimburse_shared::types::{EmployeeId, ExpenseStatusId, RoleId};
    use rstest::rstest;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(
        ExpenseError::EmployeeNotFound(EmployeeId(7)),
        StatusCode::NOT_FOUND,
        "employee_not_found"
    )]
    #[case(
        ExpenseError::InactiveRole { role_id: RoleId(2) },
        StatusCode::UNPROCESSABLE_ENTITY,
        "inactive_role"
    )]
    #[case(
        ExpenseError::InvalidStatus(ExpenseStatusId(4)),
        StatusCode::BAD_REQUEST,
        "invalid_status"
    )]
    #[tokio::test]
    async fn test_client_errors_keep_details(
        #[case] err: ExpenseError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let message = err.to_string();
        let response = map_expense_error(&err);
        assert_eq!(response.status(), status);

        let body = body_json(response).await;
        assert_eq!(body["error"], code);
        assert_eq!(body["message"], message);
    }

    #[tokio::test]
    async fn test_server_errors_are_generic() {
        let err = ExpenseError::Store(StoreError::new("connection refused"));
        let response = map_expense_error(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "An error occurred");
    }

    #[tokio::test]
    async fn test_app_validation_error() {
        let err = AppError::Validation("statusId or statusName is required".into());
        let response = map_app_error(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
    }
}
