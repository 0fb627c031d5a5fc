//! Response bodies shared by the employee and manager routes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use reimburse_core::expense::{
    CategoryHistory, CategoryPackage, Expense, ExpenseStatusKind, RoleCategoryPackage,
};
use reimburse_shared::types::{
    CategoryId, CategoryPackageId, EmployeeId, ExpenseId, ExpenseStatusId, RoleCategoryPackageId,
    RoleId,
};

/// An expense as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: ExpenseId,
    /// Submitting employee.
    pub employee_id: EmployeeId,
    /// Expense category.
    pub category_id: CategoryId,
    /// Current status ID.
    pub status_id: ExpenseStatusId,
    /// Status name for the conventional ids.
    pub status: Option<&'static str>,
    /// Claimed amount.
    pub amount: i64,
    /// Submission time.
    pub submit_date: DateTime<Utc>,
    /// Approval time, set only while approved.
    pub approved_date: Option<DateTime<Utc>>,
}

impl From<Expense> for ExpenseResponse {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            employee_id: e.employee_id,
            category_id: e.category_id,
            status_id: e.status_id,
            status: ExpenseStatusKind::from_id(e.status_id).map(ExpenseStatusKind::as_str),
            amount: e.amount,
            submit_date: e.submit_date,
            approved_date: e.approved_date,
        }
    }
}

/// Converts a list of expenses into response bodies.
pub fn expense_list(expenses: Vec<Expense>) -> Vec<ExpenseResponse> {
    expenses.into_iter().map(Into::into).collect()
}

/// One category of an employee's spending history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHistoryResponse {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Package name.
    pub package_name: String,
    /// Limit for the category.
    pub expense_limit: i64,
    /// Sum of all submitted amounts.
    pub total_submitted_amount: i64,
    /// Limit minus submitted; negative when overspent.
    pub remaining_amount: i64,
    /// Overspend warning.
    pub message: Option<String>,
}

impl From<CategoryHistory> for CategoryHistoryResponse {
    fn from(h: CategoryHistory) -> Self {
        Self {
            category_id: h.category_id,
            category_name: h.category_name,
            package_name: h.package_name,
            expense_limit: h.expense_limit,
            total_submitted_amount: h.total_submitted_amount,
            remaining_amount: h.remaining_amount,
            message: h.message,
        }
    }
}

/// A created category package.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPackageResponse {
    /// Package ID.
    pub id: CategoryPackageId,
    /// Category the limit applies to.
    pub category_id: CategoryId,
    /// Package name.
    pub package_name: String,
    /// Maximum amount.
    pub expense_limit: i64,
}

impl From<CategoryPackage> for CategoryPackageResponse {
    fn from(p: CategoryPackage) -> Self {
        Self {
            id: p.id,
            category_id: p.category_id,
            package_name: p.package_name,
            expense_limit: p.expense_limit,
        }
    }
}

/// A created role-package link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCategoryPackageResponse {
    /// Link ID.
    pub id: RoleCategoryPackageId,
    /// Role ID.
    pub role_id: RoleId,
    /// Linked package ID.
    pub category_package_id: CategoryPackageId,
}

impl From<RoleCategoryPackage> for RoleCategoryPackageResponse {
    fn from(l: RoleCategoryPackage) -> Self {
        Self {
            id: l.id,
            role_id: l.role_id,
            category_package_id: l.category_package_id,
        }
    }
}
