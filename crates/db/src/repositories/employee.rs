//! Employee repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use reimburse_shared::types::{EmployeeId, RoleId};

use crate::entities::employees;

/// Employee repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the role does not exist or the insert fails.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        role_id: RoleId,
    ) -> Result<employees::Model, DbErr> {
        employees::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            role_id: Set(role_id.into_inner()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Finds an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: EmployeeId) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Lists the employees of a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_role(&self, role_id: RoleId) -> Result<Vec<employees::Model>, DbErr> {
        employees::Entity::find()
            .filter(employees::Column::RoleId.eq(role_id.into_inner()))
            .order_by_asc(employees::Column::Id)
            .all(&self.db)
            .await
    }

    /// Deletes an employee; their expenses go with them (`ON DELETE CASCADE`).
    ///
    /// Returns false if no row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: EmployeeId) -> Result<bool, DbErr> {
        let result = employees::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
