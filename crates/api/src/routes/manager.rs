//! Manager routes: review queues, status changes, limits and setup.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde::Deserialize;
use tracing::info;

use reimburse_core::expense::{CreateCategoryPackageInput, CreateRoleCategoryPackageInput};
use reimburse_shared::AppError;
use reimburse_shared::types::{
    CategoryId, CategoryPackageId, EmployeeId, ExpenseId, ExpenseStatusId, RoleCategoryPackageId,
    RoleId,
};

use super::responses::{
    CategoryPackageResponse, ExpenseResponse, RoleCategoryPackageResponse, expense_list,
};
use crate::AppState;
use crate::error::{map_app_error, map_expense_error};

/// Creates the manager routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/manager/employees/expenses", get(list_pending))
        .route("/manager/employees/expenses/all", get(list_all))
        .route("/manager/employees/expenses/status", get(list_by_status))
        .route("/manager/updateStatus", patch(update_status_query))
        .route(
            "/manager/expenses/{expense_id}/status/{status_id}",
            patch(update_status_path),
        )
        .route("/manager/employees/validateExpense", post(validate_expense))
        .route("/manager/category-package", post(create_category_package))
        .route(
            "/manager/role-category-package",
            post(create_role_category_package),
        )
        .route("/manager/employees/{employee_id}", delete(delete_employee))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for filtering by status; `statusId` wins when both are given.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFilterQuery {
    /// Status ID.
    pub status_id: Option<ExpenseStatusId>,
    /// Status name, matched ignoring case.
    pub status_name: Option<String>,
}

/// Query parameters for a status change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusQuery {
    /// Expense to update.
    pub expense_id: ExpenseId,
    /// Target status.
    pub status_id: ExpenseStatusId,
}

/// Request body for the limit check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseValidationRequest {
    /// Role of the submitting employee.
    pub role_id: RoleId,
    /// Role-package link to check against.
    pub category_package_id: RoleCategoryPackageId,
    /// Proposed amount.
    pub expense_amount: i64,
}

/// Request body for creating a category package.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPackageRequest {
    /// Category the limit applies to.
    pub category_id: CategoryId,
    /// Package name.
    pub package_name: String,
    /// Maximum amount.
    pub expense_limit: i64,
}

/// Request body for linking a package to a role.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleCategoryPackageRequest {
    /// Role ID.
    pub role_id: RoleId,
    /// Package ID.
    pub category_package_id: CategoryPackageId,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/manager/employees/expenses` - Expenses awaiting review.
async fn list_pending(State(state): State<AppState>) -> impl IntoResponse {
    match state.expenses.pending_expenses().await {
        Ok(expenses) => (StatusCode::OK, Json(expense_list(expenses))).into_response(),
        Err(e) => map_expense_error(&e),
    }
}

/// GET `/manager/employees/expenses/all` - Every expense.
async fn list_all(State(state): State<AppState>) -> impl IntoResponse {
    match state.expenses.all_expenses().await {
        Ok(expenses) => (StatusCode::OK, Json(expense_list(expenses))).into_response(),
        Err(e) => map_expense_error(&e),
    }
}

/// GET `/manager/employees/expenses/status` - Expenses by status id or name.
async fn list_by_status(
    State(state): State<AppState>,
    Query(query): Query<StatusFilterQuery>,
) -> impl IntoResponse {
    let result = match (query.status_id, query.status_name.as_deref()) {
        (Some(status_id), _) => state.expenses.expenses_by_status_id(status_id).await,
        (None, Some(name)) => state.expenses.expenses_by_status_name(name).await,
        (None, None) => {
            return map_app_error(&AppError::Validation(
                "statusId or statusName is required".to_string(),
            ));
        }
    };

    match result {
        Ok(expenses) => (StatusCode::OK, Json(expense_list(expenses))).into_response(),
        Err(e) => map_expense_error(&e),
    }
}

async fn update_status(
    state: &AppState,
    expense_id: ExpenseId,
    status_id: ExpenseStatusId,
) -> axum::response::Response {
    match state.expenses.update_expense_status(expense_id, status_id).await {
        Ok(expense) => {
            info!(
                expense_id = %expense.id,
                status_id = %expense.status_id,
                "Expense status updated"
            );
            (StatusCode::OK, Json(ExpenseResponse::from(expense))).into_response()
        }
        Err(e) => map_expense_error(&e),
    }
}

/// PATCH `/manager/updateStatus?expenseId&statusId` - Change an expense's status.
async fn update_status_query(
    State(state): State<AppState>,
    Query(query): Query<UpdateStatusQuery>,
) -> impl IntoResponse {
    update_status(&state, query.expense_id, query.status_id).await
}

/// PATCH `/manager/expenses/{expense_id}/status/{status_id}` - Change an expense's status.
async fn update_status_path(
    State(state): State<AppState>,
    Path((expense_id, status_id)): Path<(ExpenseId, ExpenseStatusId)>,
) -> impl IntoResponse {
    update_status(&state, expense_id, status_id).await
}

/// POST `/manager/employees/validateExpense` - Check an amount against a role's limit.
async fn validate_expense(
    State(state): State<AppState>,
    Json(payload): Json<ExpenseValidationRequest>,
) -> impl IntoResponse {
    match state
        .expenses
        .validate_expense_limit(
            payload.role_id,
            payload.category_package_id,
            payload.expense_amount,
        )
        .await
    {
        Ok(within_limit) => (StatusCode::OK, Json(within_limit)).into_response(),
        Err(e) => map_expense_error(&e),
    }
}

/// POST `/manager/category-package` - Create a category package.
async fn create_category_package(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryPackageRequest>,
) -> impl IntoResponse {
    let input = CreateCategoryPackageInput {
        category_id: payload.category_id,
        package_name: payload.package_name,
        expense_limit: payload.expense_limit,
    };

    match state.expenses.create_category_package(input).await {
        Ok(package) => {
            info!(
                package_id = %package.id,
                category_id = %package.category_id,
                limit = package.expense_limit,
                "Category package created"
            );
            (
                StatusCode::CREATED,
                Json(CategoryPackageResponse::from(package)),
            )
                .into_response()
        }
        Err(e) => map_expense_error(&e),
    }
}

/// POST `/manager/role-category-package` - Link a package to a role.
async fn create_role_category_package(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoleCategoryPackageRequest>,
) -> impl IntoResponse {
    let input = CreateRoleCategoryPackageInput {
        role_id: payload.role_id,
        category_package_id: payload.category_package_id,
    };

    match state.expenses.create_role_category_package(input).await {
        Ok(link) => {
            info!(
                link_id = %link.id,
                role_id = %link.role_id,
                package_id = %link.category_package_id,
                "Role category package created"
            );
            (
                StatusCode::CREATED,
                Json(RoleCategoryPackageResponse::from(link)),
            )
                .into_response()
        }
        Err(e) => map_expense_error(&e),
    }
}

/// DELETE `/manager/employees/{employee_id}` - Remove an employee and their expenses.
async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
) -> impl IntoResponse {
    match state.expenses.delete_employee(employee_id).await {
        Ok(()) => {
            info!(employee_id = %employee_id, "Employee deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => map_expense_error(&e),
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
