//! Core business logic for expense reimbursement.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the [`store::ReimbursementStore`] trait.
//!
//! # Modules
//!
//! - `expense` - Submission, status transitions, limit validation, category history
//! - `store` - Storage abstraction and an in-memory implementation

pub mod expense;
pub mod store;

pub use expense::{ExpenseError, ExpenseService};
pub use store::{MemoryStore, ReimbursementStore, StoreError};
