//! Pure expense rules.
//!
//! Nothing here touches storage; the service feeds these functions the
//! records it has loaded.

use chrono::{DateTime, Utc};

use reimburse_shared::types::{ExpenseStatusId, RoleId};

use super::error::ExpenseError;
use super::types::{ExpenseStatusKind, Role, RolePackageLimit, StatusChange};

/// Stateless expense rules.
pub struct ExpensePolicy;

impl ExpensePolicy {
    /// Largest amount a single expense may claim.
    pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

    /// Requires a claimed amount in `1..=MAX_AMOUNT`.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::InvalidAmount` otherwise.
    pub fn ensure_valid_amount(amount: i64) -> Result<(), ExpenseError> {
        if (1..=Self::MAX_AMOUNT).contains(&amount) {
            Ok(())
        } else {
            Err(ExpenseError::InvalidAmount(amount))
        }
    }

    /// Requires the submitting employee's role to be active.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::InactiveRole` if the role is inactive.
    pub fn ensure_role_active(role: &Role) -> Result<(), ExpenseError> {
        if role.is_active {
            Ok(())
        } else {
            Err(ExpenseError::InactiveRole { role_id: role.id })
        }
    }

    /// Computes the status and approval timestamp for a transition.
    ///
    /// Approved stamps `now`; Pending and Rejected clear the timestamp.
    /// Any status may follow any other.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::InvalidStatus` if the id is not 1, 2, or 3.
    pub fn status_change(
        status_id: ExpenseStatusId,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, ExpenseError> {
        let kind =
            ExpenseStatusKind::from_id(status_id).ok_or(ExpenseError::InvalidStatus(status_id))?;

        let approved_date = match kind {
            ExpenseStatusKind::Approved => Some(now),
            ExpenseStatusKind::Pending | ExpenseStatusKind::Rejected => None,
        };

        Ok(StatusChange {
            status_id,
            approved_date,
        })
    }

    /// Returns true iff the link exists, belongs to `role_id`, and `amount`
    /// does not exceed the linked package's limit.
    #[must_use]
    pub fn within_limit(link: Option<&RolePackageLimit>, role_id: RoleId, amount: i64) -> bool {
        link.is_some_and(|link| link.role_id == role_id && amount <= link.package.expense_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use reimburse_shared::types::{CategoryId, CategoryPackageId, RoleCategoryPackageId};
    use rstest::rstest;

    use crate::expense::types::{Category, CategoryPackage};

    fn link(role: i32, limit: i64) -> RolePackageLimit {
        RolePackageLimit {
            link_id: RoleCategoryPackageId(1),
            role_id: RoleId(role),
            package: CategoryPackage {
                id: CategoryPackageId(10),
                category_id: CategoryId(100),
                package_name: "Standard".to_string(),
                expense_limit: limit,
            },
            category: Category {
                id: CategoryId(100),
                name: "Travel".to_string(),
                is_active: true,
            },
        }
    }

    #[rstest]
    #[case(5, 900, true)]
    #[case(5, 1000, true)]
    #[case(5, 1100, false)]
    #[case(6, 500, false)]
    fn test_within_limit(#[case] role: i32, #[case] amount: i64, #[case] expected: bool) {
        let p1 = link(5, 1000);
        assert_eq!(
            ExpensePolicy::within_limit(Some(&p1), RoleId(role), amount),
            expected
        );
    }

    #[test]
    fn test_missing_link_is_never_within_limit() {
        assert!(!ExpensePolicy::within_limit(None, RoleId(5), 0));
    }

    #[rstest]
    #[case(1, true)]
    #[case(ExpensePolicy::MAX_AMOUNT, true)]
    #[case(0, false)]
    #[case(-50, false)]
    #[case(i64::MIN, false)]
    #[case(ExpensePolicy::MAX_AMOUNT + 1, false)]
    #[case(i64::MAX, false)]
    fn test_amount_bounds(#[case] amount: i64, #[case] valid: bool) {
        match ExpensePolicy::ensure_valid_amount(amount) {
            Ok(()) => assert!(valid),
            Err(err) => {
                assert!(!valid);
                assert!(matches!(err, ExpenseError::InvalidAmount(a) if a == amount));
            }
        }
    }

    #[test]
    fn test_inactive_role_rejected() {
        let role = Role {
            id: RoleId(3),
            name: "Contractor".to_string(),
            is_active: false,
        };
        let err = ExpensePolicy::ensure_role_active(&role).unwrap_err();
        assert!(matches!(err, ExpenseError::InactiveRole { role_id } if role_id == RoleId(3)));
    }

    #[test]
    fn test_active_role_accepted() {
        let role = Role {
            id: RoleId(1),
            name: "Engineer".to_string(),
            is_active: true,
        };
        assert!(ExpensePolicy::ensure_role_active(&role).is_ok());
    }

    #[test]
    fn test_approve_sets_approved_date() {
        let now = Utc::now();
        let change = ExpensePolicy::status_change(ExpenseStatusId(2), now).unwrap();
        assert_eq!(change.status_id, ExpenseStatusId(2));
        assert_eq!(change.approved_date, Some(now));
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    fn test_pending_and_rejected_clear_approved_date(#[case] status: i32) {
        let change = ExpensePolicy::status_change(ExpenseStatusId(status), Utc::now()).unwrap();
        assert_eq!(change.status_id, ExpenseStatusId(status));
        assert_eq!(change.approved_date, None);
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(-1)]
    fn test_out_of_range_status_rejected(#[case] status: i32) {
        let err = ExpensePolicy::status_change(ExpenseStatusId(status), Utc::now()).unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidStatus(id) if id == ExpenseStatusId(status)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The predicate holds exactly when role matches and amount <= limit.
        #[test]
        fn prop_within_limit_matches_definition(
            link_role in 1i32..10,
            asked_role in 1i32..10,
            limit in 0i64..1_000_000,
            amount in -1_000i64..2_000_000,
        ) {
            let l = link(link_role, limit);
            let expected = link_role == asked_role && amount <= limit;
            prop_assert_eq!(
                ExpensePolicy::within_limit(Some(&l), RoleId(asked_role), amount),
                expected
            );
        }
    }
}
