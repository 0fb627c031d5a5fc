//! PostgreSQL-backed [`ReimbursementStore`].

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::error;

use reimburse_core::expense::{
    Category, CategoryPackage, CreateCategoryPackageInput, CreateRoleCategoryPackageInput,
    DateRange, Employee, Expense, ExpenseStatus, NewExpense, Role, RoleCategoryPackage,
    RolePackageLimit, StatusChange,
};
use reimburse_core::{ReimbursementStore, StoreError};
use reimburse_shared::types::{
    CategoryId, CategoryPackageId, EmployeeId, ExpenseId, ExpenseStatusId, RoleCategoryPackageId,
    RoleId,
};

use crate::entities::{
    categories, category_packages, employees, expense_statuses, expenses, role_category_packages,
    roles,
};
use crate::repositories::{
    CategoryRepository, CreateExpenseInput, EmployeeRepository, ExpenseRepository,
    ExpenseStatusRepository, PackageLimitRow, PackageRepository, RoleRepository,
};

type StoreResult<T> = Result<T, StoreError>;

fn store_err(e: DbErr) -> StoreError {
    error!(error = %e, "Database operation failed");
    StoreError::new(e)
}

/// Store implementation over the repositories of this crate.
#[derive(Debug, Clone)]
pub struct DbStore {
    employees: EmployeeRepository,
    roles: RoleRepository,
    categories: CategoryRepository,
    packages: PackageRepository,
    statuses: ExpenseStatusRepository,
    expenses: ExpenseRepository,
}

impl DbStore {
    /// Creates a store sharing one connection pool across repositories.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            employees: EmployeeRepository::new(db.clone()),
            roles: RoleRepository::new(db.clone()),
            categories: CategoryRepository::new(db.clone()),
            packages: PackageRepository::new(db.clone()),
            statuses: ExpenseStatusRepository::new(db.clone()),
            expenses: ExpenseRepository::new(db),
        }
    }
}

#[async_trait]
impl ReimbursementStore for DbStore {
    async fn find_employee(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        let model = self.employees.find_by_id(id).await.map_err(store_err)?;
        Ok(model.map(Into::into))
    }

    async fn delete_employee(&self, id: EmployeeId) -> StoreResult<bool> {
        self.employees.delete(id).await.map_err(store_err)
    }

    async fn find_role(&self, id: RoleId) -> StoreResult<Option<Role>> {
        let model = self.roles.find_by_id(id).await.map_err(store_err)?;
        Ok(model.map(Into::into))
    }

    async fn find_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let model = self.categories.find_by_id(id).await.map_err(store_err)?;
        Ok(model.map(Into::into))
    }

    async fn find_category_package(
        &self,
        id: CategoryPackageId,
    ) -> StoreResult<Option<CategoryPackage>> {
        let model = self.packages.find_package(id).await.map_err(store_err)?;
        Ok(model.map(Into::into))
    }

    async fn insert_category_package(
        &self,
        input: CreateCategoryPackageInput,
    ) -> StoreResult<CategoryPackage> {
        let model = self
            .packages
            .create_package(input.category_id, &input.package_name, input.expense_limit)
            .await
            .map_err(store_err)?;
        Ok(model.into())
    }

    async fn insert_role_category_package(
        &self,
        input: CreateRoleCategoryPackageInput,
    ) -> StoreResult<RoleCategoryPackage> {
        let model = self
            .packages
            .create_link(input.role_id, input.category_package_id)
            .await
            .map_err(store_err)?;
        Ok(model.into())
    }

    async fn find_role_package_limit(
        &self,
        id: RoleCategoryPackageId,
    ) -> StoreResult<Option<RolePackageLimit>> {
        let row = self.packages.find_limit(id).await.map_err(store_err)?;
        Ok(row.map(Into::into))
    }

    async fn role_package_limits(&self, role_id: RoleId) -> StoreResult<Vec<RolePackageLimit>> {
        let rows = self
            .packages
            .limits_for_role(role_id)
            .await
            .map_err(store_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_status(&self, id: ExpenseStatusId) -> StoreResult<Option<ExpenseStatus>> {
        let model = self.statuses.find_by_id(id).await.map_err(store_err)?;
        Ok(model.map(Into::into))
    }

    async fn find_statuses_by_name(&self, name: &str) -> StoreResult<Vec<ExpenseStatus>> {
        let models = self.statuses.find_by_name(name).await.map_err(store_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_expense(&self, id: ExpenseId) -> StoreResult<Option<Expense>> {
        let model = self.expenses.find_by_id(id).await.map_err(store_err)?;
        Ok(model.map(Into::into))
    }

    async fn insert_expense(&self, expense: NewExpense) -> StoreResult<Expense> {
        let model = self
            .expenses
            .create(CreateExpenseInput {
                employee_id: expense.employee_id,
                category_id: expense.category_id,
                status_id: expense.status_id,
                amount: expense.amount,
                submit_date: expense.submit_date,
            })
            .await
            .map_err(store_err)?;
        Ok(model.into())
    }

    async fn update_expense_status(
        &self,
        id: ExpenseId,
        change: StatusChange,
    ) -> StoreResult<Option<Expense>> {
        let model = self
            .expenses
            .update_status(id, change.status_id, change.approved_date)
            .await
            .map_err(store_err)?;
        Ok(model.map(Into::into))
    }

    async fn list_expenses(&self) -> StoreResult<Vec<Expense>> {
        let models = self.expenses.list().await.map_err(store_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn expenses_by_statuses(&self, ids: &[ExpenseStatusId]) -> StoreResult<Vec<Expense>> {
        let models = self
            .expenses
            .list_by_statuses(ids)
            .await
            .map_err(store_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn expenses_by_employee(&self, employee_id: EmployeeId) -> StoreResult<Vec<Expense>> {
        let models = self
            .expenses
            .list_by_employee(employee_id)
            .await
            .map_err(store_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn expenses_in_range(
        &self,
        employee_id: EmployeeId,
        range: DateRange,
    ) -> StoreResult<Vec<Expense>> {
        let models = self
            .expenses
            .list_in_range(employee_id, range.start, range.end)
            .await
            .map_err(store_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Model conversions
// ============================================================================

impl From<employees::Model> for Employee {
    fn from(m: employees::Model) -> Self {
        Self {
            id: EmployeeId(m.id),
            name: m.name,
            email: m.email,
            role_id: RoleId(m.role_id),
        }
    }
}

impl From<roles::Model> for Role {
    fn from(m: roles::Model) -> Self {
        Self {
            id: RoleId(m.id),
            name: m.name,
            is_active: m.is_active,
        }
    }
}

impl From<categories::Model> for Category {
    fn from(m: categories::Model) -> Self {
        Self {
            id: CategoryId(m.id),
            name: m.name,
            is_active: m.is_active,
        }
    }
}

impl From<category_packages::Model> for CategoryPackage {
    fn from(m: category_packages::Model) -> Self {
        Self {
            id: CategoryPackageId(m.id),
            category_id: CategoryId(m.category_id),
            package_name: m.package_name,
            expense_limit: m.expense_limit,
        }
    }
}

impl From<role_category_packages::Model> for RoleCategoryPackage {
    fn from(m: role_category_packages::Model) -> Self {
        Self {
            id: RoleCategoryPackageId(m.id),
            role_id: RoleId(m.role_id),
            category_package_id: CategoryPackageId(m.category_package_id),
        }
    }
}

impl From<PackageLimitRow> for RolePackageLimit {
    fn from(row: PackageLimitRow) -> Self {
        Self {
            link_id: RoleCategoryPackageId(row.link.id),
            role_id: RoleId(row.link.role_id),
            package: row.package.into(),
            category: row.category.into(),
        }
    }
}

impl From<expense_statuses::Model> for ExpenseStatus {
    fn from(m: expense_statuses::Model) -> Self {
        Self {
            id: ExpenseStatusId(m.id),
            name: m.name,
            is_active: m.is_active,
        }
    }
}

impl From<expenses::Model> for Expense {
    fn from(m: expenses::Model) -> Self {
        Self {
            id: ExpenseId(m.id),
            employee_id: EmployeeId(m.employee_id),
            category_id: CategoryId(m.category_id),
            status_id: ExpenseStatusId(m.status_id),
            amount: m.amount,
            submit_date: m.submit_date.with_timezone(&Utc),
            approved_date: m.approved_date.map(|d| d.with_timezone(&Utc)),
        }
    }
}
