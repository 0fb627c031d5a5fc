//! Storage abstraction for the expense service.
//!
//! The database crate implements [`ReimbursementStore`] over PostgreSQL;
//! [`MemoryStore`] backs tests and local demos.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use reimburse_shared::types::{
    CategoryId, CategoryPackageId, EmployeeId, ExpenseId, ExpenseStatusId, RoleCategoryPackageId,
    RoleId,
};

use crate::expense::types::{
    Category, CategoryPackage, CreateCategoryPackageInput, CreateRoleCategoryPackageInput,
    DateRange, Employee, Expense, ExpenseStatus, NewExpense, Role, RoleCategoryPackage,
    RolePackageLimit, StatusChange,
};

pub use memory::MemoryStore;

/// Storage failure, carried as text so the core stays free of driver types.
#[derive(Debug, Clone, Error)]
#[error("Storage error: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    /// Creates a storage error from any displayable cause.
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self(cause.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations needed by [`crate::ExpenseService`].
///
/// Lookups return `Ok(None)` for missing records; the service decides
/// whether that is an error.
#[async_trait]
pub trait ReimbursementStore: Send + Sync {
    /// Finds an employee by ID.
    async fn find_employee(&self, id: EmployeeId) -> StoreResult<Option<Employee>>;

    /// Deletes an employee and, by cascade, their expenses.
    ///
    /// Returns false if no such employee existed.
    async fn delete_employee(&self, id: EmployeeId) -> StoreResult<bool>;

    /// Finds a role by ID.
    async fn find_role(&self, id: RoleId) -> StoreResult<Option<Role>>;

    /// Finds a category by ID.
    async fn find_category(&self, id: CategoryId) -> StoreResult<Option<Category>>;

    /// Finds a category package by ID.
    async fn find_category_package(
        &self,
        id: CategoryPackageId,
    ) -> StoreResult<Option<CategoryPackage>>;

    /// Persists a new category package.
    async fn insert_category_package(
        &self,
        input: CreateCategoryPackageInput,
    ) -> StoreResult<CategoryPackage>;

    /// Persists a new role-package link.
    async fn insert_role_category_package(
        &self,
        input: CreateRoleCategoryPackageInput,
    ) -> StoreResult<RoleCategoryPackage>;

    /// Finds a role-package link joined with its package and category.
    async fn find_role_package_limit(
        &self,
        id: RoleCategoryPackageId,
    ) -> StoreResult<Option<RolePackageLimit>>;

    /// Lists all links of a role joined with their packages and categories.
    async fn role_package_limits(&self, role_id: RoleId) -> StoreResult<Vec<RolePackageLimit>>;

    /// Finds an expense status by ID.
    async fn find_status(&self, id: ExpenseStatusId) -> StoreResult<Option<ExpenseStatus>>;

    /// Finds expense statuses by name, ignoring case.
    async fn find_statuses_by_name(&self, name: &str) -> StoreResult<Vec<ExpenseStatus>>;

    /// Finds an expense by ID.
    async fn find_expense(&self, id: ExpenseId) -> StoreResult<Option<Expense>>;

    /// Persists a new expense.
    async fn insert_expense(&self, expense: NewExpense) -> StoreResult<Expense>;

    /// Writes a status transition; returns `None` if the expense is gone.
    async fn update_expense_status(
        &self,
        id: ExpenseId,
        change: StatusChange,
    ) -> StoreResult<Option<Expense>>;

    /// Lists all expenses ordered by ID.
    async fn list_expenses(&self) -> StoreResult<Vec<Expense>>;

    /// Lists expenses in any of the given statuses, newest submission first.
    async fn expenses_by_statuses(&self, ids: &[ExpenseStatusId]) -> StoreResult<Vec<Expense>>;

    /// Lists an employee's expenses ordered by ID.
    async fn expenses_by_employee(&self, employee_id: EmployeeId) -> StoreResult<Vec<Expense>>;

    /// Lists an employee's expenses submitted within `range`, oldest first.
    async fn expenses_in_range(
        &self,
        employee_id: EmployeeId,
        range: DateRange,
    ) -> StoreResult<Vec<Expense>>;
}
