//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod category;
pub mod employee;
pub mod expense;
pub mod expense_status;
pub mod package;
pub mod role;

pub use category::CategoryRepository;
pub use employee::EmployeeRepository;
pub use expense::{CreateExpenseInput, ExpenseRepository};
pub use expense_status::ExpenseStatusRepository;
pub use package::{PackageLimitRow, PackageRepository};
pub use role::RoleRepository;
