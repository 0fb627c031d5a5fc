//! Category repository for database operations.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use reimburse_shared::types::CategoryId;

use crate::entities::categories;

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new active category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, name: &str) -> Result<categories::Model, DbErr> {
        categories::ActiveModel {
            name: Set(name.to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Finds a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: CategoryId) -> Result<Option<categories::Model>, DbErr> {
        categories::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Lists all categories by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<categories::Model>, DbErr> {
        categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
    }
}
