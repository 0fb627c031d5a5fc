//! Employee-facing expense routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use reimburse_core::expense::SubmitExpenseInput;
use reimburse_shared::types::{CategoryId, EmployeeId};

use super::responses::{CategoryHistoryResponse, ExpenseResponse, expense_list};
use crate::AppState;
use crate::error::map_expense_error;

/// Creates the employee routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees/{employee_id}", post(submit_expense))
        .route("/employees/{employee_id}/expenses", get(list_employee_expenses))
        .route("/employees/expenses/filter", get(filter_by_date_range))
        .route("/employees/history/{employee_id}", get(get_history))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for submitting an expense.
///
/// Status and dates are assigned by the server; any such fields in the
/// body are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitExpenseRequest {
    /// Expense category.
    pub category_id: CategoryId,
    /// Claimed amount.
    pub amount: i64,
}

/// Query parameters for the date range filter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    /// Employee whose expenses to list.
    pub employee_id: EmployeeId,
    /// First day included (`YYYY-MM-DD`).
    pub start_date: NaiveDate,
    /// Last day included (`YYYY-MM-DD`).
    pub end_date: NaiveDate,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/employees/{employee_id}` - Submit an expense.
async fn submit_expense(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
    Json(payload): Json<SubmitExpenseRequest>,
) -> impl IntoResponse {
    let input = SubmitExpenseInput {
        category_id: payload.category_id,
        amount: payload.amount,
    };

    match state.expenses.submit_expense(employee_id, input).await {
        Ok(expense) => {
            info!(
                employee_id = %employee_id,
                expense_id = %expense.id,
                amount = expense.amount,
                "Expense submitted"
            );
            (StatusCode::CREATED, Json(ExpenseResponse::from(expense))).into_response()
        }
        Err(e) => map_expense_error(&e),
    }
}

/// GET `/employees/{employee_id}/expenses` - List an employee's expenses.
async fn list_employee_expenses(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
) -> impl IntoResponse {
    match state.expenses.expenses_for_employee(employee_id).await {
        Ok(expenses) => (StatusCode::OK, Json(expense_list(expenses))).into_response(),
        Err(e) => map_expense_error(&e),
    }
}

/// GET `/employees/expenses/filter` - List an employee's expenses between two days.
async fn filter_by_date_range(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> impl IntoResponse {
    match state
        .expenses
        .expenses_in_date_range(query.employee_id, query.start_date, query.end_date)
        .await
    {
        Ok(expenses) => (StatusCode::OK, Json(expense_list(expenses))).into_response(),
        Err(e) => map_expense_error(&e),
    }
}

/// GET `/employees/history/{employee_id}` - Per-category spending against limits.
async fn get_history(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
) -> impl IntoResponse {
    match state.expenses.employee_history(employee_id).await {
        Ok(history) => {
            let response: Vec<CategoryHistoryResponse> =
                history.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => map_expense_error(&e),
    }
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
