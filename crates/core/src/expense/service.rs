//! Expense service over an injected store.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use reimburse_shared::types::{EmployeeId, ExpenseId, ExpenseStatusId, RoleCategoryPackageId, RoleId};

use super::error::ExpenseError;
use super::history::summarize_history;
use super::policy::ExpensePolicy;
use super::types::{
    CategoryHistory, CategoryPackage, CreateCategoryPackageInput, CreateRoleCategoryPackageInput,
    DateRange, Employee, Expense, ExpenseStatusKind, NewExpense, Role, RoleCategoryPackage,
    SubmitExpenseInput,
};
use crate::store::ReimbursementStore;

/// Expense operations backed by a [`ReimbursementStore`].
#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn ReimbursementStore>,
}

impl std::fmt::Debug for ExpenseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseService").finish_non_exhaustive()
    }
}

impl ExpenseService {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn ReimbursementStore>) -> Self {
        Self { store }
    }

    async fn employee(&self, id: EmployeeId) -> Result<Employee, ExpenseError> {
        self.store
            .find_employee(id)
            .await?
            .ok_or(ExpenseError::EmployeeNotFound(id))
    }

    async fn role(&self, id: RoleId) -> Result<Role, ExpenseError> {
        self.store
            .find_role(id)
            .await?
            .ok_or(ExpenseError::RoleNotFound(id))
    }

    /// Submits an expense on behalf of an employee.
    ///
    /// The expense always starts Pending with `submit_date = now` and no
    /// approval date. The amount is checked before any lookup; the role
    /// check runs before the category lookup.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` unless `1 <= amount <= ExpensePolicy::MAX_AMOUNT`
    /// - `EmployeeNotFound`, `RoleNotFound`, `CategoryNotFound`, `StatusNotFound`
    /// - `InactiveRole` if the employee's role is inactive
    pub async fn submit_expense(
        &self,
        employee_id: EmployeeId,
        input: SubmitExpenseInput,
    ) -> Result<Expense, ExpenseError> {
        ExpensePolicy::ensure_valid_amount(input.amount)?;

        let employee = self.employee(employee_id).await?;
        let role = self.role(employee.role_id).await?;
        ExpensePolicy::ensure_role_active(&role)?;

        let category = self
            .store
            .find_category(input.category_id)
            .await?
            .ok_or(ExpenseError::CategoryNotFound(input.category_id))?;

        let pending = ExpenseStatusKind::Pending.id();
        let status = self
            .store
            .find_status(pending)
            .await?
            .ok_or(ExpenseError::StatusNotFound(pending))?;

        let expense = self
            .store
            .insert_expense(NewExpense {
                employee_id: employee.id,
                category_id: category.id,
                status_id: status.id,
                amount: input.amount,
                submit_date: Utc::now(),
            })
            .await?;

        Ok(expense)
    }

    /// Moves an expense to another status.
    ///
    /// Approved stamps the approval date; Pending and Rejected clear it.
    /// The status id is range-checked before any write, so a rejected
    /// request leaves the expense untouched.
    ///
    /// # Errors
    ///
    /// - `ExpenseNotFound`, `StatusNotFound`
    /// - `InvalidStatus` if the id is not 1, 2, or 3
    pub async fn update_expense_status(
        &self,
        expense_id: ExpenseId,
        status_id: ExpenseStatusId,
    ) -> Result<Expense, ExpenseError> {
        self.store
            .find_expense(expense_id)
            .await?
            .ok_or(ExpenseError::ExpenseNotFound(expense_id))?;

        let change = ExpensePolicy::status_change(status_id, Utc::now())?;

        self.store
            .find_status(status_id)
            .await?
            .ok_or(ExpenseError::StatusNotFound(status_id))?;

        self.store
            .update_expense_status(expense_id, change)
            .await?
            .ok_or(ExpenseError::ExpenseNotFound(expense_id))
    }

    /// Checks an amount against a role's package limit.
    ///
    /// A missing link, a link of another role, or an amount above the limit
    /// all yield `false`.
    ///
    /// # Errors
    ///
    /// Only storage failures.
    pub async fn validate_expense_limit(
        &self,
        role_id: RoleId,
        link_id: RoleCategoryPackageId,
        amount: i64,
    ) -> Result<bool, ExpenseError> {
        let link = self.store.find_role_package_limit(link_id).await?;
        Ok(ExpensePolicy::within_limit(link.as_ref(), role_id, amount))
    }

    /// Summarizes an employee's spending per eligible category.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound`
    pub async fn employee_history(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<CategoryHistory>, ExpenseError> {
        let employee = self.employee(employee_id).await?;
        let limits = self.store.role_package_limits(employee.role_id).await?;
        let expenses = self.store.expenses_by_employee(employee.id).await?;

        Ok(summarize_history(&limits, &expenses))
    }

    /// Lists every expense.
    pub async fn all_expenses(&self) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self.store.list_expenses().await?)
    }

    /// Lists expenses awaiting review, newest first.
    ///
    /// Empty when no status is named "Pending".
    pub async fn pending_expenses(&self) -> Result<Vec<Expense>, ExpenseError> {
        let statuses = self
            .store
            .find_statuses_by_name(ExpenseStatusKind::Pending.as_str())
            .await?;
        if statuses.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<ExpenseStatusId> = statuses.iter().map(|s| s.id).collect();
        Ok(self.store.expenses_by_statuses(&ids).await?)
    }

    /// Lists expenses with the given status id, newest first.
    ///
    /// # Errors
    ///
    /// - `StatusNotFound`
    pub async fn expenses_by_status_id(
        &self,
        status_id: ExpenseStatusId,
    ) -> Result<Vec<Expense>, ExpenseError> {
        self.store
            .find_status(status_id)
            .await?
            .ok_or(ExpenseError::StatusNotFound(status_id))?;
        Ok(self.store.expenses_by_statuses(&[status_id]).await?)
    }

    /// Lists expenses with the given status name (case-insensitive), newest first.
    ///
    /// # Errors
    ///
    /// - `StatusNameNotFound`
    pub async fn expenses_by_status_name(&self, name: &str) -> Result<Vec<Expense>, ExpenseError> {
        let statuses = self.store.find_statuses_by_name(name).await?;
        if statuses.is_empty() {
            return Err(ExpenseError::StatusNameNotFound(name.to_string()));
        }
        let ids: Vec<ExpenseStatusId> = statuses.iter().map(|s| s.id).collect();
        Ok(self.store.expenses_by_statuses(&ids).await?)
    }

    /// Lists an employee's expenses.
    pub async fn expenses_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self.store.expenses_by_employee(employee_id).await?)
    }

    /// Lists an employee's expenses submitted between two days, inclusive.
    pub async fn expenses_in_date_range(
        &self,
        employee_id: EmployeeId,
        start_day: NaiveDate,
        end_day: NaiveDate,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let range = DateRange::covering_days(start_day, end_day);
        Ok(self.store.expenses_in_range(employee_id, range).await?)
    }

    /// Creates a category package.
    ///
    /// # Errors
    ///
    /// - `InvalidPackage` for a blank name or negative limit
    /// - `CategoryNotFound`
    pub async fn create_category_package(
        &self,
        input: CreateCategoryPackageInput,
    ) -> Result<CategoryPackage, ExpenseError> {
        if input.package_name.trim().is_empty() {
            return Err(ExpenseError::InvalidPackage(
                "package name must not be blank".to_string(),
            ));
        }
        if input.expense_limit < 0 {
            return Err(ExpenseError::InvalidPackage(
                "expense limit must not be negative".to_string(),
            ));
        }

        self.store
            .find_category(input.category_id)
            .await?
            .ok_or(ExpenseError::CategoryNotFound(input.category_id))?;

        Ok(self.store.insert_category_package(input).await?)
    }

    /// Links a category package to a role.
    ///
    /// # Errors
    ///
    /// - `RoleNotFound`, `CategoryPackageNotFound`
    pub async fn create_role_category_package(
        &self,
        input: CreateRoleCategoryPackageInput,
    ) -> Result<RoleCategoryPackage, ExpenseError> {
        self.role(input.role_id).await?;
        self.store
            .find_category_package(input.category_package_id)
            .await?
            .ok_or(ExpenseError::CategoryPackageNotFound(
                input.category_package_id,
            ))?;

        Ok(self.store.insert_role_category_package(input).await?)
    }

    /// Removes an employee together with their expenses.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound`
    pub async fn delete_employee(&self, employee_id: EmployeeId) -> Result<(), ExpenseError> {
        if self.store.delete_employee(employee_id).await? {
            Ok(())
        } else {
            Err(ExpenseError::EmployeeNotFound(employee_id))
        }
    }
}
