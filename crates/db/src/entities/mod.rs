//! `SeaORM` entity definitions, one module per table.

pub mod categories;
pub mod category_packages;
pub mod employees;
pub mod expense_statuses;
pub mod expenses;
pub mod role_category_packages;
pub mod roles;

/// Common entity re-exports.
pub mod prelude {
    pub use super::categories::Entity as Categories;
    pub use super::category_packages::Entity as CategoryPackages;
    pub use super::employees::Entity as Employees;
    pub use super::expense_statuses::Entity as ExpenseStatuses;
    pub use super::expenses::Entity as Expenses;
    pub use super::role_category_packages::Entity as RoleCategoryPackages;
    pub use super::roles::Entity as Roles;
}
