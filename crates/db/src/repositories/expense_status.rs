//! Expense status repository for database operations.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use reimburse_shared::types::ExpenseStatusId;

use crate::entities::expense_statuses;

/// Read access to the expense status lookup table.
#[derive(Debug, Clone)]
pub struct ExpenseStatusRepository {
    db: DatabaseConnection,
}

impl ExpenseStatusRepository {
    /// Creates a new expense status repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a status by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: ExpenseStatusId,
    ) -> Result<Option<expense_statuses::Model>, DbErr> {
        expense_statuses::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Finds statuses whose name matches, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<expense_statuses::Model>, DbErr> {
        expense_statuses::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(expense_statuses::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .order_by_asc(expense_statuses::Column::Id)
            .all(&self.db)
            .await
    }

    /// Lists all statuses by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<expense_statuses::Model>, DbErr> {
        expense_statuses::Entity::find()
            .order_by_asc(expense_statuses::Column::Id)
            .all(&self.db)
            .await
    }
}
