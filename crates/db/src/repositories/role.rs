//! Role repository for database operations.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use reimburse_shared::types::RoleId;

use crate::entities::roles;

/// Role repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    db: DatabaseConnection,
}

impl RoleRepository {
    /// Creates a new role repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, name: &str, is_active: bool) -> Result<roles::Model, DbErr> {
        roles::ActiveModel {
            name: Set(name.to_string()),
            is_active: Set(is_active),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Finds a role by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: RoleId) -> Result<Option<roles::Model>, DbErr> {
        roles::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Lists all roles by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<roles::Model>, DbErr> {
        roles::Entity::find()
            .order_by_asc(roles::Column::Name)
            .all(&self.db)
            .await
    }

    /// Activates or deactivates a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the role does not exist or the update fails.
    pub async fn set_active(&self, id: RoleId, is_active: bool) -> Result<roles::Model, DbErr> {
        roles::ActiveModel {
            id: Set(id.into_inner()),
            is_active: Set(is_active),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }
}
