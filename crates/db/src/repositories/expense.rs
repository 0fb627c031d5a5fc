//! Expense repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use reimburse_shared::types::{CategoryId, EmployeeId, ExpenseId, ExpenseStatusId};

use crate::entities::expenses;

/// Input for creating an expense row.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Submitting employee.
    pub employee_id: EmployeeId,
    /// Expense category.
    pub category_id: CategoryId,
    /// Initial status.
    pub status_id: ExpenseStatusId,
    /// Claimed amount.
    pub amount: i64,
    /// Submission time.
    pub submit_date: DateTime<Utc>,
}

/// Expense repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an expense with no approval date.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced row is missing or the insert fails.
    pub async fn create(&self, input: CreateExpenseInput) -> Result<expenses::Model, DbErr> {
        expenses::ActiveModel {
            employee_id: Set(input.employee_id.into_inner()),
            category_id: Set(input.category_id.into_inner()),
            status_id: Set(input.status_id.into_inner()),
            amount: Set(input.amount),
            submit_date: Set(input.submit_date.into()),
            approved_date: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Finds an expense by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: ExpenseId) -> Result<Option<expenses::Model>, DbErr> {
        expenses::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Sets an expense's status and approval date.
    ///
    /// Returns `None` if the expense does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_status(
        &self,
        id: ExpenseId,
        status_id: ExpenseStatusId,
        approved_date: Option<DateTime<Utc>>,
    ) -> Result<Option<expenses::Model>, DbErr> {
        let Some(expense) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: expenses::ActiveModel = expense.into();
        active.status_id = Set(status_id.into_inner());
        active.approved_date = Set(approved_date.map(Into::into));
        let updated = active.update(&self.db).await?;

        Ok(Some(updated))
    }

    /// Lists all expenses by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<expenses::Model>, DbErr> {
        expenses::Entity::find()
            .order_by_asc(expenses::Column::Id)
            .all(&self.db)
            .await
    }

    /// Lists expenses in any of the given statuses, newest submission first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_statuses(
        &self,
        status_ids: &[ExpenseStatusId],
    ) -> Result<Vec<expenses::Model>, DbErr> {
        if status_ids.is_empty() {
            return Ok(Vec::new());
        }

        expenses::Entity::find()
            .filter(expenses::Column::StatusId.is_in(status_ids.iter().map(|id| id.into_inner())))
            .order_by_desc(expenses::Column::SubmitDate)
            .order_by_desc(expenses::Column::Id)
            .all(&self.db)
            .await
    }

    /// Lists an employee's expenses by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<expenses::Model>, DbErr> {
        expenses::Entity::find()
            .filter(expenses::Column::EmployeeId.eq(employee_id.into_inner()))
            .order_by_asc(expenses::Column::Id)
            .all(&self.db)
            .await
    }

    /// Lists an employee's expenses submitted within `[start, end]`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_in_range(
        &self,
        employee_id: EmployeeId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<expenses::Model>, DbErr> {
        expenses::Entity::find()
            .filter(expenses::Column::EmployeeId.eq(employee_id.into_inner()))
            .filter(expenses::Column::SubmitDate.between(start, end))
            .order_by_asc(expenses::Column::SubmitDate)
            .order_by_asc(expenses::Column::Id)
            .all(&self.db)
            .await
    }
}
