//! Expense claims and role-based category spending limits.
//!
//! # Modules
//!
//! - `types` - Domain records and inputs
//! - `error` - Expense-specific error types
//! - `policy` - Pure rules: role activity, status transitions, limit check
//! - `history` - Per-category spending aggregation
//! - `service` - Store-backed operations used by the HTTP layer

pub mod error;
pub mod history;
pub mod policy;
pub mod service;
pub mod types;

#[cfg(test)]
mod history_props;

pub use error::ExpenseError;
pub use history::summarize_history;
pub use policy::ExpensePolicy;
pub use service::ExpenseService;
pub use types::{
    Category, CategoryHistory, CategoryPackage, CreateCategoryPackageInput,
    CreateRoleCategoryPackageInput, DateRange, Employee, Expense, ExpenseStatus,
    ExpenseStatusKind, NewExpense, Role, RoleCategoryPackage, RolePackageLimit, StatusChange,
    SubmitExpenseInput,
};
