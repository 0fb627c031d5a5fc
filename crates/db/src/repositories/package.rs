//! Category package repository: spending limits and their role assignments.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use reimburse_shared::types::{CategoryId, CategoryPackageId, RoleCategoryPackageId, RoleId};

use crate::entities::{categories, category_packages, role_category_packages};

/// A role-package link joined with its package and the package's category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLimitRow {
    /// The link row.
    pub link: role_category_packages::Model,
    /// The linked package.
    pub package: category_packages::Model,
    /// The package's category.
    pub category: categories::Model,
}

/// Repository for category packages and role-package links.
#[derive(Debug, Clone)]
pub struct PackageRepository {
    db: DatabaseConnection,
}

impl PackageRepository {
    /// Creates a new package repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category package.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the insert fails.
    pub async fn create_package(
        &self,
        category_id: CategoryId,
        package_name: &str,
        expense_limit: i64,
    ) -> Result<category_packages::Model, DbErr> {
        category_packages::ActiveModel {
            category_id: Set(category_id.into_inner()),
            package_name: Set(package_name.to_string()),
            expense_limit: Set(expense_limit),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Finds a category package by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_package(
        &self,
        id: CategoryPackageId,
    ) -> Result<Option<category_packages::Model>, DbErr> {
        category_packages::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Links a package to a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the role or package does not exist or the insert fails.
    pub async fn create_link(
        &self,
        role_id: RoleId,
        category_package_id: CategoryPackageId,
    ) -> Result<role_category_packages::Model, DbErr> {
        role_category_packages::ActiveModel {
            role_id: Set(role_id.into_inner()),
            category_package_id: Set(category_package_id.into_inner()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Finds a link by ID together with its package and category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_limit(
        &self,
        id: RoleCategoryPackageId,
    ) -> Result<Option<PackageLimitRow>, DbErr> {
        let rows = role_category_packages::Entity::find_by_id(id.into_inner())
            .find_also_related(category_packages::Entity)
            .all(&self.db)
            .await?;

        Ok(self.attach_categories(rows).await?.into_iter().next())
    }

    /// Lists all links of a role together with their packages and categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn limits_for_role(&self, role_id: RoleId) -> Result<Vec<PackageLimitRow>, DbErr> {
        let rows = role_category_packages::Entity::find()
            .filter(role_category_packages::Column::RoleId.eq(role_id.into_inner()))
            .order_by_asc(role_category_packages::Column::Id)
            .find_also_related(category_packages::Entity)
            .all(&self.db)
            .await?;

        self.attach_categories(rows).await
    }

    async fn attach_categories(
        &self,
        rows: Vec<(
            role_category_packages::Model,
            Option<category_packages::Model>,
        )>,
    ) -> Result<Vec<PackageLimitRow>, DbErr> {
        let pairs: Vec<_> = rows
            .into_iter()
            .filter_map(|(link, package)| package.map(|p| (link, p)))
            .collect();
        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        let category_ids: Vec<i32> = pairs.iter().map(|(_, p)| p.category_id).collect();
        let categories: HashMap<i32, categories::Model> = categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(pairs
            .into_iter()
            .filter_map(|(link, package)| {
                let category = categories.get(&package.category_id)?.clone();
                Some(PackageLimitRow {
                    link,
                    package,
                    category,
                })
            })
            .collect())
    }
}
