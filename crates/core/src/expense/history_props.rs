//! Property-based tests for category history aggregation.

use chrono::Utc;
use proptest::prelude::*;

use reimburse_shared::types::{
    CategoryId, CategoryPackageId, EmployeeId, ExpenseId, ExpenseStatusId, RoleCategoryPackageId,
    RoleId,
};

use crate::expense::history::summarize_history;
use crate::expense::types::{Category, CategoryPackage, Expense, RolePackageLimit};

const NAMES: [&str; 5] = ["Travel", "Meals", "Lodging", "Equipment", "Training"];

/// Strategy for (category index, amount) pairs.
fn arb_expenses() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((0usize..NAMES.len(), 1i64..10_000), 0..40)
}

/// Strategy for per-category limits.
fn arb_limits() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..50_000, NAMES.len())
}

fn build(limits: &[i64], expenses: &[(usize, i64)]) -> (Vec<RolePackageLimit>, Vec<Expense>) {
    let links = limits
        .iter()
        .enumerate()
        .map(|(i, &limit)| {
            let id = i32::try_from(i).unwrap() + 1;
            RolePackageLimit {
                link_id: RoleCategoryPackageId(id),
                role_id: RoleId(1),
                package: CategoryPackage {
                    id: CategoryPackageId(id),
                    category_id: CategoryId(id),
                    package_name: "Standard".to_string(),
                    expense_limit: limit,
                },
                category: Category {
                    id: CategoryId(id),
                    name: NAMES[i].to_string(),
                    is_active: true,
                },
            }
        })
        .collect();

    let expenses = expenses
        .iter()
        .enumerate()
        .map(|(n, &(cat, amount))| Expense {
            id: ExpenseId(i32::try_from(n).unwrap() + 1),
            employee_id: EmployeeId(1),
            category_id: CategoryId(i32::try_from(cat).unwrap() + 1),
            status_id: ExpenseStatusId(1),
            amount,
            submit_date: Utc::now(),
            approved_date: None,
        })
        .collect();

    (links, expenses)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Reported totals add up to the sum of all expenses when every category is linked.
    #[test]
    fn prop_totals_cover_all_expenses(limits in arb_limits(), expenses in arb_expenses()) {
        let (links, records) = build(&limits, &expenses);
        let history = summarize_history(&links, &records);

        let reported: i64 = history.iter().map(|h| h.total_submitted_amount).sum();
        let submitted: i64 = expenses.iter().map(|(_, amount)| amount).sum();
        prop_assert_eq!(reported, submitted);
    }

    /// remaining = limit - submitted, and a warning appears exactly when negative.
    #[test]
    fn prop_remaining_and_warning(limits in arb_limits(), expenses in arb_expenses()) {
        let (links, records) = build(&limits, &expenses);
        for entry in summarize_history(&links, &records) {
            prop_assert_eq!(entry.remaining_amount, entry.expense_limit - entry.total_submitted_amount);
            prop_assert_eq!(entry.message.is_some(), entry.remaining_amount < 0);
        }
    }

    /// Output is sorted by category name.
    #[test]
    fn prop_sorted_by_name(limits in arb_limits(), expenses in arb_expenses()) {
        let (links, records) = build(&limits, &expenses);
        let history = summarize_history(&links, &records);
        prop_assert!(history.windows(2).all(|w| w[0].category_name <= w[1].category_name));
    }
}
