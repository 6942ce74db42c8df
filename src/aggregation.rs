//! Derived views over the expense records.
//!
//! Provides functions to total expense amounts, group totals by category,
//! and compare a category's spending against its budget limit. All sums use
//! exact decimal arithmetic and are returned unrounded; rounding is a
//! presentation concern.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BudgetLimit, CategoryName, Expense};

/// The percentage of a budget limit at which spending counts as "near" it.
const NEAR_LIMIT_PERCENTAGE: u32 = 80;

/// Sum of the amounts of `expenses`.
///
/// Returns zero for an empty slice.
pub fn total_balance(expenses: &[Expense]) -> Decimal {
    expenses
        .iter()
        .map(|expense| expense.amount().value())
        .sum()
}

/// Sum of amounts grouped by category.
///
/// Categories with no expenses are absent from the result rather than
/// present with a zero total.
pub fn category_summary(expenses: &[Expense]) -> BTreeMap<CategoryName, Decimal> {
    let mut summary = BTreeMap::new();

    for expense in expenses {
        *summary
            .entry(expense.category().clone())
            .or_insert(Decimal::ZERO) += expense.amount().value();
    }

    summary
}

/// How far a category's spending has progressed towards its budget limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// No limit has been set for the category.
    NoLimit,
    /// Spending is below the warning threshold.
    UnderLimit,
    /// Spending has reached 80% of the limit.
    NearLimit,
    /// Spending has reached or passed the limit.
    OverLimit,
}

/// A category's spending measured against its budget limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    /// Where the spending sits relative to the limit.
    pub status: BudgetStatus,
    /// The total spent in the category.
    pub spent: Decimal,
    /// The configured limit, absent when no limit is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Decimal>,
    /// Spending as a percentage of the limit, absent when no limit is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
}

/// Measure the spending in `expenses` against `limit`.
///
/// `expenses` should already be restricted to the category the limit applies
/// to; this function only does the arithmetic.
pub fn budget_report(limit: Option<&BudgetLimit>, expenses: &[Expense]) -> BudgetReport {
    let spent = total_balance(expenses);

    let Some(limit) = limit else {
        return BudgetReport {
            status: BudgetStatus::NoLimit,
            spent,
            limit: None,
            percentage: None,
        };
    };

    // Limits are strictly positive, so the division cannot fail.
    let limit_value = limit.limit.value();
    let percentage = spent / limit_value * Decimal::ONE_HUNDRED;

    let status = if percentage >= Decimal::ONE_HUNDRED {
        BudgetStatus::OverLimit
    } else if percentage >= Decimal::from(NEAR_LIMIT_PERCENTAGE) {
        BudgetStatus::NearLimit
    } else {
        BudgetStatus::UnderLimit
    };

    BudgetReport {
        status,
        spent,
        limit: Some(limit_value),
        percentage: Some(percentage),
    }
}

#[cfg(test)]
mod aggregation_tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use time::{Date, Month};

    use crate::models::{BudgetLimit, CategoryName, Expense, ExpenseId};

    use super::{BudgetStatus, budget_report, category_summary, total_balance};

    fn expense(amount: &str, category: &str) -> Expense {
        Expense::build(
            amount.parse().unwrap(),
            CategoryName::new_unchecked(category),
        )
        .date(Date::from_calendar_date(2025, Month::April, 1).unwrap())
        .finalise(ExpenseId::generate())
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            expense("45.99", "Groceries"),
            expense("12.50", "Transportation"),
            expense("30.00", "Dining"),
            expense("25.75", "Groceries"),
        ]
    }

    #[test]
    fn total_balance_sums_exactly() {
        let balance = total_balance(&sample_expenses());

        assert_eq!(balance, Decimal::from_str("114.24").unwrap());
    }

    #[test]
    fn total_balance_of_empty_slice_is_zero() {
        assert_eq!(total_balance(&[]), Decimal::ZERO);
    }

    #[test]
    fn category_summary_groups_exactly() {
        let summary = category_summary(&sample_expenses());

        assert_eq!(summary.len(), 3);
        assert_eq!(
            summary[&CategoryName::new_unchecked("Groceries")],
            Decimal::from_str("71.74").unwrap()
        );
        assert_eq!(
            summary[&CategoryName::new_unchecked("Transportation")],
            Decimal::from_str("12.50").unwrap()
        );
        assert_eq!(
            summary[&CategoryName::new_unchecked("Dining")],
            Decimal::from_str("30.00").unwrap()
        );
    }

    #[test]
    fn category_summary_of_empty_slice_is_empty() {
        assert!(category_summary(&[]).is_empty());
    }

    #[test]
    fn category_summary_omits_categories_with_no_expenses() {
        let summary = category_summary(&[expense("30.00", "Dining")]);

        assert!(!summary.contains_key(&CategoryName::new_unchecked("Groceries")));
    }

    fn groceries_limit(limit: &str) -> BudgetLimit {
        BudgetLimit {
            category: CategoryName::new_unchecked("Groceries"),
            limit: limit.parse().unwrap(),
        }
    }

    #[test]
    fn budget_report_without_limit() {
        let report = budget_report(None, &[expense("45.99", "Groceries")]);

        assert_eq!(report.status, BudgetStatus::NoLimit);
        assert_eq!(report.spent, Decimal::from_str("45.99").unwrap());
        assert_eq!(report.limit, None);
        assert_eq!(report.percentage, None);
    }

    #[test]
    fn budget_report_under_limit() {
        let report = budget_report(
            Some(&groceries_limit("100.00")),
            &[expense("45.99", "Groceries")],
        );

        assert_eq!(report.status, BudgetStatus::UnderLimit);
        assert_eq!(report.limit, Some(Decimal::from_str("100.00").unwrap()));
    }

    #[test]
    fn budget_report_near_limit_at_eighty_percent() {
        let report = budget_report(
            Some(&groceries_limit("100.00")),
            &[expense("80.00", "Groceries")],
        );

        assert_eq!(report.status, BudgetStatus::NearLimit);
        assert_eq!(report.percentage, Some(Decimal::from(80)));
    }

    #[test]
    fn budget_report_over_limit_at_one_hundred_percent() {
        let report = budget_report(
            Some(&groceries_limit("100.00")),
            &[expense("60.00", "Groceries"), expense("40.00", "Groceries")],
        );

        assert_eq!(report.status, BudgetStatus::OverLimit);
    }

    #[test]
    fn budget_status_serializes_in_snake_case() {
        let json = serde_json::to_string(&BudgetStatus::NearLimit).unwrap();

        assert_eq!(json, "\"near_limit\"");
    }
}
