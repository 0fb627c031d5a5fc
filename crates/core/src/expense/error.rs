//! Expense error types.
//!
//! Errors fall into four groups: missing records (404), operations refused
//! in the current state (422), invalid arguments (400), and storage
//! failures (500).

use thiserror::Error;

use reimburse_shared::AppError;
use reimburse_shared::types::{
    CategoryId, CategoryPackageId, EmployeeId, ExpenseId, ExpenseStatusId, RoleId,
};

use crate::store::StoreError;

/// Errors that can occur during expense operations.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Employee not found.
    #[error("Employee not found with ID: {0}")]
    EmployeeNotFound(EmployeeId),

    /// Role not found.
    #[error("Role not found with ID: {0}")]
    RoleNotFound(RoleId),

    /// Category not found.
    #[error("Category not found with ID: {0}")]
    CategoryNotFound(CategoryId),

    /// Category package not found.
    #[error("Category package not found with ID: {0}")]
    CategoryPackageNotFound(CategoryPackageId),

    /// Expense not found.
    #[error("Expense not found with ID: {0}")]
    ExpenseNotFound(ExpenseId),

    /// Expense status not found by id.
    #[error("Expense status not found with ID: {0}")]
    StatusNotFound(ExpenseStatusId),

    /// Expense status not found by name.
    #[error("Expense status not found with name: {0}")]
    StatusNameNotFound(String),

    /// The employee's role is inactive.
    #[error("Employee role {role_id} is inactive. Cannot submit expense.")]
    InactiveRole {
        /// The inactive role.
        role_id: RoleId,
    },

    /// Status id outside the allowed set.
    #[error(
        "Invalid status ID {0}. Allowed values are 1 (Pending), 2 (Approved), or 3 (Rejected)."
    )]
    InvalidStatus(ExpenseStatusId),

    /// Claimed amount is not positive or exceeds the submission cap.
    #[error("Invalid expense amount {0}. Amount must be between 1 and 1000000000000.")]
    InvalidAmount(i64),

    /// Category package input is invalid.
    #[error("Invalid category package: {0}")]
    InvalidPackage(String),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ExpenseError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::EmployeeNotFound(_)
            | Self::RoleNotFound(_)
            | Self::CategoryNotFound(_)
            | Self::CategoryPackageNotFound(_)
            | Self::ExpenseNotFound(_)
            | Self::StatusNotFound(_)
            | Self::StatusNameNotFound(_) => 404,

            Self::InactiveRole { .. } => 422,

            Self::InvalidStatus(_) | Self::InvalidAmount(_) | Self::InvalidPackage(_) => 400,

            Self::Store(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmployeeNotFound(_) => "employee_not_found",
            Self::RoleNotFound(_) => "role_not_found",
            Self::CategoryNotFound(_) => "category_not_found",
            Self::CategoryPackageNotFound(_) => "category_package_not_found",
            Self::ExpenseNotFound(_) => "expense_not_found",
            Self::StatusNotFound(_) | Self::StatusNameNotFound(_) => "status_not_found",
            Self::InactiveRole { .. } => "inactive_role",
            Self::InvalidStatus(_) => "invalid_status",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InvalidPackage(_) => "invalid_package",
            Self::Store(_) => "internal_error",
        }
    }
}

impl From<ExpenseError> for AppError {
    fn from(err: ExpenseError) -> Self {
        let message = err.to_string();
        match err {
            ExpenseError::EmployeeNotFound(_)
            | ExpenseError::RoleNotFound(_)
            | ExpenseError::CategoryNotFound(_)
            | ExpenseError::CategoryPackageNotFound(_)
            | ExpenseError::ExpenseNotFound(_)
            | ExpenseError::StatusNotFound(_)
            | ExpenseError::StatusNameNotFound(_) => Self::NotFound(message),
            ExpenseError::InactiveRole { .. } => Self::BusinessRule(message),
            ExpenseError::InvalidStatus(_)
            | ExpenseError::InvalidAmount(_)
            | ExpenseError::InvalidPackage(_) => Self::Validation(message),
            ExpenseError::Store(e) => Self::Database(e.to_string()),
        }
    }
}
