//! In-memory store for tests and local demos.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use reimburse_shared::types::{
    CategoryId, CategoryPackageId, EmployeeId, ExpenseId, ExpenseStatusId, RoleCategoryPackageId,
    RoleId,
};

use super::{ReimbursementStore, StoreError, StoreResult};
use crate::expense::types::{
    Category, CategoryPackage, CreateCategoryPackageInput, CreateRoleCategoryPackageInput,
    DateRange, Employee, Expense, ExpenseStatus, ExpenseStatusKind, NewExpense, Role,
    RoleCategoryPackage, RolePackageLimit, StatusChange,
};

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    roles: BTreeMap<RoleId, Role>,
    employees: BTreeMap<EmployeeId, Employee>,
    categories: BTreeMap<CategoryId, Category>,
    packages: BTreeMap<CategoryPackageId, CategoryPackage>,
    links: BTreeMap<RoleCategoryPackageId, RoleCategoryPackage>,
    statuses: BTreeMap<ExpenseStatusId, ExpenseStatus>,
    expenses: BTreeMap<ExpenseId, Expense>,
}

impl Tables {
    /// Hands out ids from a single sequence shared by all tables.
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn join_link(&self, link: &RoleCategoryPackage) -> Option<RolePackageLimit> {
        let package = self.packages.get(&link.category_package_id)?;
        let category = self.categories.get(&package.category_id)?;
        Some(RolePackageLimit {
            link_id: link.id,
            role_id: link.role_id,
            package: package.clone(),
            category: category.clone(),
        })
    }
}

/// Store keeping every table in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store with no status rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the Pending/Approved/Rejected status rows.
    #[must_use]
    pub fn with_default_statuses() -> Self {
        let mut tables = Tables::default();
        for kind in ExpenseStatusKind::ALL {
            tables.statuses.insert(
                kind.id(),
                ExpenseStatus {
                    id: kind.id(),
                    name: kind.as_str().to_string(),
                    is_active: true,
                },
            );
        }
        // Keep generated ids clear of the fixed status ids.
        tables.next_id = 100;

        Self {
            tables: RwLock::new(tables),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent operation fail with a storage error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::new("store unavailable"))
        } else {
            Ok(())
        }
    }

    /// Adds a role.
    pub async fn add_role(&self, name: &str, is_active: bool) -> Role {
        let mut tables = self.tables.write().await;
        let role = Role {
            id: RoleId(tables.next_id()),
            name: name.to_string(),
            is_active,
        };
        tables.roles.insert(role.id, role.clone());
        role
    }

    /// Adds an employee.
    pub async fn add_employee(&self, name: &str, email: &str, role_id: RoleId) -> Employee {
        let mut tables = self.tables.write().await;
        let employee = Employee {
            id: EmployeeId(tables.next_id()),
            name: name.to_string(),
            email: email.to_string(),
            role_id,
        };
        tables.employees.insert(employee.id, employee.clone());
        employee
    }

    /// Adds a category.
    pub async fn add_category(&self, name: &str) -> Category {
        let mut tables = self.tables.write().await;
        let category = Category {
            id: CategoryId(tables.next_id()),
            name: name.to_string(),
            is_active: true,
        };
        tables.categories.insert(category.id, category.clone());
        category
    }

    /// Adds a status row with an explicit id.
    pub async fn add_status(&self, id: ExpenseStatusId, name: &str) -> ExpenseStatus {
        let status = ExpenseStatus {
            id,
            name: name.to_string(),
            is_active: true,
        };
        self.tables
            .write()
            .await
            .statuses
            .insert(id, status.clone());
        status
    }

    /// Adds an expense with explicit timestamps, bypassing submission rules.
    pub async fn add_expense(&self, expense: NewExpense) -> Expense {
        let mut tables = self.tables.write().await;
        let expense = Expense {
            id: ExpenseId(tables.next_id()),
            employee_id: expense.employee_id,
            category_id: expense.category_id,
            status_id: expense.status_id,
            amount: expense.amount,
            submit_date: expense.submit_date,
            approved_date: None,
        };
        tables.expenses.insert(expense.id, expense.clone());
        expense
    }
}

#[async_trait]
impl ReimbursementStore for MemoryStore {
    async fn find_employee(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        self.check_available()?;
        Ok(self.tables.read().await.employees.get(&id).cloned())
    }

    async fn delete_employee(&self, id: EmployeeId) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.employees.remove(&id).is_none() {
            return Ok(false);
        }
        tables.expenses.retain(|_, e| e.employee_id != id);
        Ok(true)
    }

    async fn find_role(&self, id: RoleId) -> StoreResult<Option<Role>> {
        self.check_available()?;
        Ok(self.tables.read().await.roles.get(&id).cloned())
    }

    async fn find_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        self.check_available()?;
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_category_package(
        &self,
        id: CategoryPackageId,
    ) -> StoreResult<Option<CategoryPackage>> {
        self.check_available()?;
        Ok(self.tables.read().await.packages.get(&id).cloned())
    }

    async fn insert_category_package(
        &self,
        input: CreateCategoryPackageInput,
    ) -> StoreResult<CategoryPackage> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&input.category_id) {
            return Err(StoreError::new(format!(
                "foreign key violation: category {}",
                input.category_id
            )));
        }
        let package = CategoryPackage {
            id: CategoryPackageId(tables.next_id()),
            category_id: input.category_id,
            package_name: input.package_name,
            expense_limit: input.expense_limit,
        };
        tables.packages.insert(package.id, package.clone());
        Ok(package)
    }

    async fn insert_role_category_package(
        &self,
        input: CreateRoleCategoryPackageInput,
    ) -> StoreResult<RoleCategoryPackage> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.roles.contains_key(&input.role_id)
            || !tables.packages.contains_key(&input.category_package_id)
        {
            return Err(StoreError::new("foreign key violation: role or package"));
        }
        let link = RoleCategoryPackage {
            id: RoleCategoryPackageId(tables.next_id()),
            role_id: input.role_id,
            category_package_id: input.category_package_id,
        };
        tables.links.insert(link.id, link.clone());
        Ok(link)
    }

    async fn find_role_package_limit(
        &self,
        id: RoleCategoryPackageId,
    ) -> StoreResult<Option<RolePackageLimit>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.links.get(&id).and_then(|link| tables.join_link(link)))
    }

    async fn role_package_limits(&self, role_id: RoleId) -> StoreResult<Vec<RolePackageLimit>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .values()
            .filter(|link| link.role_id == role_id)
            .filter_map(|link| tables.join_link(link))
            .collect())
    }

    async fn find_status(&self, id: ExpenseStatusId) -> StoreResult<Option<ExpenseStatus>> {
        self.check_available()?;
        Ok(self.tables.read().await.statuses.get(&id).cloned())
    }

    async fn find_statuses_by_name(&self, name: &str) -> StoreResult<Vec<ExpenseStatus>> {
        self.check_available()?;
        let name = name.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .statuses
            .values()
            .filter(|s| s.name.to_lowercase() == name)
            .cloned()
            .collect())
    }

    async fn find_expense(&self, id: ExpenseId) -> StoreResult<Option<Expense>> {
        self.check_available()?;
        Ok(self.tables.read().await.expenses.get(&id).cloned())
    }

    async fn insert_expense(&self, expense: NewExpense) -> StoreResult<Expense> {
        self.check_available()?;
        Ok(self.add_expense(expense).await)
    }

    async fn update_expense_status(
        &self,
        id: ExpenseId,
        change: StatusChange,
    ) -> StoreResult<Option<Expense>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        Ok(tables.expenses.get_mut(&id).map(|expense| {
            expense.status_id = change.status_id;
            expense.approved_date = change.approved_date;
            expense.clone()
        }))
    }

    async fn list_expenses(&self) -> StoreResult<Vec<Expense>> {
        self.check_available()?;
        Ok(self.tables.read().await.expenses.values().cloned().collect())
    }

    async fn expenses_by_statuses(&self, ids: &[ExpenseStatusId]) -> StoreResult<Vec<Expense>> {
        self.check_available()?;
        let mut expenses: Vec<Expense> = self
            .tables
            .read()
            .await
            .expenses
            .values()
            .filter(|e| ids.contains(&e.status_id))
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.submit_date.cmp(&a.submit_date).then(b.id.cmp(&a.id)));
        Ok(expenses)
    }

    async fn expenses_by_employee(&self, employee_id: EmployeeId) -> StoreResult<Vec<Expense>> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .await
            .expenses
            .values()
            .filter(|e| e.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn expenses_in_range(
        &self,
        employee_id: EmployeeId,
        range: DateRange,
    ) -> StoreResult<Vec<Expense>> {
        self.check_available()?;
        let mut expenses: Vec<Expense> = self
            .tables
            .read()
            .await
            .expenses
            .values()
            .filter(|e| e.employee_id == employee_id && range.contains(e.submit_date))
            .cloned()
            .collect();
        expenses.sort_by(|a, b| a.submit_date.cmp(&b.submit_date).then(a.id.cmp(&b.id)));
        Ok(expenses)
    }
}
