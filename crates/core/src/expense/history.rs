//! Per-category spending history.

use std::collections::HashMap;

use reimburse_shared::types::CategoryId;

use super::types::{CategoryHistory, Expense, RolePackageLimit};

/// Builds the overspend warning for a category.
#[must_use]
pub fn overspend_message(category_name: &str) -> String {
    format!("You have exceeded the expense limit for the {category_name} category.")
}

/// Sums expense amounts per category, saturating at the `i64` bounds.
#[must_use]
pub fn totals_by_category(expenses: &[Expense]) -> HashMap<CategoryId, i64> {
    let mut totals: HashMap<CategoryId, i64> = HashMap::new();
    for expense in expenses {
        let total = totals.entry(expense.category_id).or_default();
        *total = total.saturating_add(expense.amount);
    }
    totals
}

/// Summarizes an employee's spending against their role's package limits.
///
/// One entry per role link, ordered by category name. Expenses in categories
/// the role has no link for are not reported.
#[must_use]
pub fn summarize_history(limits: &[RolePackageLimit], expenses: &[Expense]) -> Vec<CategoryHistory> {
    let totals = totals_by_category(expenses);

    let mut history: Vec<CategoryHistory> = limits
        .iter()
        .map(|limit| {
            let total_submitted_amount = totals.get(&limit.category.id).copied().unwrap_or(0);
            let remaining_amount = limit
                .package
                .expense_limit
                .saturating_sub(total_submitted_amount);
            let message = (remaining_amount < 0).then(|| overspend_message(&limit.category.name));

            CategoryHistory {
                category_id: limit.category.id,
                category_name: limit.category.name.clone(),
                package_name: limit.package.package_name.clone(),
                expense_limit: limit.package.expense_limit,
                total_submitted_amount,
                remaining_amount,
                message,
            }
        })
        .collect();

    history.sort_by(|a, b| a.category_name.cmp(&b.category_name));
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use reimburse_shared::types::{
        CategoryPackageId, EmployeeId, ExpenseId, ExpenseStatusId, RoleCategoryPackageId, RoleId,
    };

    use crate::expense::types::{Category, CategoryPackage};

    fn limit(category: i32, name: &str, amount: i64) -> RolePackageLimit {
        RolePackageLimit {
            link_id: RoleCategoryPackageId(category),
            role_id: RoleId(1),
            package: CategoryPackage {
                id: CategoryPackageId(category),
                category_id: CategoryId(category),
                package_name: format!("{name} package"),
                expense_limit: amount,
            },
            category: Category {
                id: CategoryId(category),
                name: name.to_string(),
                is_active: true,
            },
        }
    }

    fn expense(id: i32, category: i32, amount: i64) -> Expense {
        Expense {
            id: ExpenseId(id),
            employee_id: EmployeeId(1),
            category_id: CategoryId(category),
            status_id: ExpenseStatusId(1),
            amount,
            submit_date: Utc::now(),
            approved_date: None,
        }
    }

    #[test]
    fn test_history_sums_and_warns() {
        let limits = vec![limit(2, "Meals", 50), limit(1, "Lodging", 120)];
        let expenses = vec![expense(1, 1, 100), expense(2, 1, 50), expense(3, 2, 30)];

        let history = summarize_history(&limits, &expenses);

        assert_eq!(history.len(), 2);

        assert_eq!(history[0].category_name, "Lodging");
        assert_eq!(history[0].total_submitted_amount, 150);
        assert_eq!(history[0].remaining_amount, -30);
        assert_eq!(
            history[0].message.as_deref(),
            Some("You have exceeded the expense limit for the Lodging category.")
        );

        assert_eq!(history[1].category_name, "Meals");
        assert_eq!(history[1].total_submitted_amount, 30);
        assert_eq!(history[1].remaining_amount, 20);
        assert_eq!(history[1].message, None);
    }

    #[test]
    fn test_category_without_expenses_has_full_budget() {
        let history = summarize_history(&[limit(1, "Travel", 500)], &[]);
        assert_eq!(history[0].total_submitted_amount, 0);
        assert_eq!(history[0].remaining_amount, 500);
        assert!(history[0].message.is_none());
    }

    #[test]
    fn test_exactly_at_limit_has_no_warning() {
        let history = summarize_history(&[limit(1, "Travel", 500)], &[expense(1, 1, 500)]);
        assert_eq!(history[0].remaining_amount, 0);
        assert!(history[0].message.is_none());
    }

    #[test]
    fn test_unlinked_categories_are_ignored() {
        let history = summarize_history(&[limit(1, "Travel", 500)], &[expense(1, 9, 10_000)]);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].total_submitted_amount, 0);
    }

    #[test]
    fn test_oversized_totals_saturate() {
        let expenses = vec![expense(1, 1, i64::MAX), expense(2, 1, i64::MAX)];

        let history = summarize_history(&[limit(1, "Travel", 500)], &expenses);

        assert_eq!(history[0].total_submitted_amount, i64::MAX);
        assert_eq!(history[0].remaining_amount, 500 - i64::MAX);
        assert!(history[0].message.is_some());
    }

    #[test]
    fn test_minimum_amount_does_not_wrap_remaining() {
        let history = summarize_history(&[limit(1, "Travel", 500)], &[expense(1, 1, i64::MIN)]);

        assert_eq!(history[0].total_submitted_amount, i64::MIN);
        assert_eq!(history[0].remaining_amount, i64::MAX);
        assert!(history[0].message.is_none());
    }

    #[test]
    fn test_no_links_yields_empty_history() {
        assert!(summarize_history(&[], &[expense(1, 1, 10)]).is_empty());
    }
}
