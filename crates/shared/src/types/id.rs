//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `EmployeeId` where a `RoleId` is expected.
//! All entities use integer surrogate keys assigned by the database.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Creates an ID from a raw database key.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Returns the inner key.
            #[must_use]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

typed_id!(EmployeeId, "Unique identifier for an employee.");
typed_id!(RoleId, "Unique identifier for a role.");
typed_id!(CategoryId, "Unique identifier for an expense category.");
typed_id!(
    CategoryPackageId,
    "Unique identifier for a category spending package."
);
typed_id!(
    RoleCategoryPackageId,
    "Unique identifier for a role-to-package link."
);
typed_id!(ExpenseId, "Unique identifier for an expense claim.");
typed_id!(ExpenseStatusId, "Unique identifier for an expense status.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
