//! Expense domain types.
//!
//! Records reference each other by id; joins happen explicitly through the store.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use reimburse_shared::types::{
    CategoryId, CategoryPackageId, EmployeeId, ExpenseId, ExpenseStatusId, RoleCategoryPackageId,
    RoleId,
};

/// Conventional expense status rows.
///
/// Any status may be reached from any other:
/// - Pending → Approved | Rejected
/// - Approved ↔ Rejected
/// - Approved | Rejected → Pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatusKind {
    /// Awaiting manager review (id 1).
    Pending,
    /// Approved by a manager (id 2).
    Approved,
    /// Rejected by a manager (id 3).
    Rejected,
}

impl ExpenseStatusKind {
    /// All statuses in id order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Returns the status row id.
    #[must_use]
    pub const fn id(self) -> ExpenseStatusId {
        match self {
            Self::Pending => ExpenseStatusId(1),
            Self::Approved => ExpenseStatusId(2),
            Self::Rejected => ExpenseStatusId(3),
        }
    }

    /// Maps a status row id to its kind.
    #[must_use]
    pub const fn from_id(id: ExpenseStatusId) -> Option<Self> {
        match id.0 {
            1 => Some(Self::Pending),
            2 => Some(Self::Approved),
            3 => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns the display name stored in the status table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ExpenseStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee ID.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role the employee belongs to.
    pub role_id: RoleId,
}

/// A role grouping employees under shared spending limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role ID.
    pub id: RoleId,
    /// Role name.
    pub name: String,
    /// Inactive roles cannot submit expenses.
    pub is_active: bool,
}

/// A spending category such as "Travel" or "Meals".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Whether the category is active.
    pub is_active: bool,
}

/// A named spending limit for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPackage {
    /// Package ID.
    pub id: CategoryPackageId,
    /// Category the limit applies to.
    pub category_id: CategoryId,
    /// Package name.
    pub package_name: String,
    /// Maximum amount.
    pub expense_limit: i64,
}

/// Assignment of a category package to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCategoryPackage {
    /// Link ID.
    pub id: RoleCategoryPackageId,
    /// Role ID.
    pub role_id: RoleId,
    /// Category package ID.
    pub category_package_id: CategoryPackageId,
}

/// A role-package link joined with its package and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePackageLimit {
    /// Link ID.
    pub link_id: RoleCategoryPackageId,
    /// Role the link belongs to.
    pub role_id: RoleId,
    /// Linked package.
    pub package: CategoryPackage,
    /// Category of the linked package.
    pub category: Category,
}

/// An expense status row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseStatus {
    /// Status ID.
    pub id: ExpenseStatusId,
    /// Status name.
    pub name: String,
    /// Whether the status is active.
    pub is_active: bool,
}

/// A reimbursement claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Submitting employee.
    pub employee_id: EmployeeId,
    /// Spending category.
    pub category_id: CategoryId,
    /// Current status.
    pub status_id: ExpenseStatusId,
    /// Claimed amount.
    pub amount: i64,
    /// When the claim was submitted.
    pub submit_date: DateTime<Utc>,
    /// When the claim was approved; `None` unless approved.
    pub approved_date: Option<DateTime<Utc>>,
}

impl Expense {
    /// Returns the conventional status kind, if the status id is one of 1/2/3.
    #[must_use]
    pub const fn status_kind(&self) -> Option<ExpenseStatusKind> {
        ExpenseStatusKind::from_id(self.status_id)
    }
}

/// An expense ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Submitting employee.
    pub employee_id: EmployeeId,
    /// Spending category.
    pub category_id: CategoryId,
    /// Initial status.
    pub status_id: ExpenseStatusId,
    /// Claimed amount.
    pub amount: i64,
    /// Submission timestamp.
    pub submit_date: DateTime<Utc>,
}

/// Client input for submitting an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitExpenseInput {
    /// Spending category.
    pub category_id: CategoryId,
    /// Claimed amount.
    pub amount: i64,
}

/// Status and approval timestamp to write on a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// New status.
    pub status_id: ExpenseStatusId,
    /// Approval timestamp; set only for Approved.
    pub approved_date: Option<DateTime<Utc>>,
}

/// Input for creating a category package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryPackageInput {
    /// Category the limit applies to.
    pub category_id: CategoryId,
    /// Package name.
    pub package_name: String,
    /// Maximum amount.
    pub expense_limit: i64,
}

/// Input for linking a package to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateRoleCategoryPackageInput {
    /// Role ID.
    pub role_id: RoleId,
    /// Category package ID.
    pub category_package_id: CategoryPackageId,
}

/// Spending summary for one eligible category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHistory {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Package providing the limit.
    pub package_name: String,
    /// Limit from the role's package.
    pub expense_limit: i64,
    /// Sum of all the employee's expenses in the category.
    pub total_submitted_amount: i64,
    /// Limit minus submitted; negative when overspent.
    pub remaining_amount: i64,
    /// Warning present only when overspent.
    pub message: Option<String>,
}

/// Inclusive submit-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First instant included.
    pub start: DateTime<Utc>,
    /// Last instant included.
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Covers `start_day` 00:00:00 through `end_day` 23:59:59.999999999 (UTC).
    #[must_use]
    pub fn covering_days(start_day: NaiveDate, end_day: NaiveDate) -> Self {
        let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap_or(NaiveTime::MIN);
        Self {
            start: start_day.and_time(NaiveTime::MIN).and_utc(),
            end: end_day.and_time(end_of_day).and_utc(),
        }
    }

    /// Returns true if `instant` falls within the range.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[cfg(test)]
mod types_tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_status_kind_ids() {
        assert_eq!(ExpenseStatusKind::Pending.id(), ExpenseStatusId(1));
        assert_eq!(ExpenseStatusKind::Approved.id(), ExpenseStatusId(2));
        assert_eq!(ExpenseStatusKind::Rejected.id(), ExpenseStatusId(3));
        for kind in ExpenseStatusKind::ALL {
            assert_eq!(ExpenseStatusKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ExpenseStatusKind::from_id(ExpenseStatusId(0)), None);
        assert_eq!(ExpenseStatusKind::from_id(ExpenseStatusId(4)), None);
    }

    #[test]
    fn test_status_kind_display() {
        assert_eq!(ExpenseStatusKind::Pending.to_string(), "Pending");
        assert_eq!(ExpenseStatusKind::Rejected.to_string(), "Rejected");
    }

    #[test]
    fn test_date_range_is_inclusive_of_whole_days() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let range = DateRange::covering_days(start, end);

        let first_instant = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let last_second = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        let last_instant = last_second + Duration::nanoseconds(999_999_999);

        assert!(range.contains(first_instant));
        assert!(range.contains(last_instant));
        assert!(!range.contains(first_instant - Duration::nanoseconds(1)));
        assert!(!range.contains(last_instant + Duration::nanoseconds(1)));
    }

    #[test]
    fn test_single_day_range() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let range = DateRange::covering_days(day, day);
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap()));
    }
}
