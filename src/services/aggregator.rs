//! Budget aggregation
//!
//! Pure functions turning a transaction list and a month into the figures the
//! budget and dashboard screens show. Nothing here reads or writes storage;
//! an empty transaction list yields zeros and empty maps.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{
    progress_percentage, BudgetAllocation, CategoryBudget, Money, MonthPeriod, Transaction,
};

/// Percentage at which a budget is exceeded
pub const EXCEEDED_PERCENT: u32 = 100;

fn expenses_in(month: MonthPeriod, transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(move |t| t.is_expense() && month.contains(&t.date))
}

/// Total expenses in a calendar month
pub fn monthly_spending(transactions: &[Transaction], month: MonthPeriod) -> Money {
    expenses_in(month, transactions).map(|t| t.amount).sum()
}

/// Total income in a calendar month
pub fn monthly_income(transactions: &[Transaction], month: MonthPeriod) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_income() && month.contains(&t.date))
        .map(|t| t.amount)
        .sum()
}

/// Expenses of one category in a calendar month (exact name match)
pub fn category_spending(transactions: &[Transaction], category: &str, month: MonthPeriod) -> Money {
    expenses_in(month, transactions)
        .filter(|t| t.category == category)
        .map(|t| t.amount)
        .sum()
}

/// Expenses per category for a month
///
/// Only categories with at least one expense that month get an entry.
pub fn category_spending_map(
    transactions: &[Transaction],
    month: MonthPeriod,
) -> BTreeMap<String, Money> {
    let mut map: BTreeMap<String, Money> = BTreeMap::new();
    for txn in expenses_in(month, transactions) {
        *map.entry(txn.category.clone()).or_default() += txn.amount;
    }
    map
}

/// Income across all transactions
pub fn total_income(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

/// Expenses across all transactions
pub fn total_expense(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum()
}

/// Income minus expenses across all transactions
pub fn balance(transactions: &[Transaction]) -> Money {
    transactions.iter().map(|t| t.signed_amount()).sum()
}

/// One row per configured category, in configured order
pub fn category_budgets(
    transactions: &[Transaction],
    categories: &[String],
    allocation: &BudgetAllocation,
    month: MonthPeriod,
) -> Vec<CategoryBudget> {
    let spent = category_spending_map(transactions, month);
    categories
        .iter()
        .map(|category| {
            CategoryBudget::new(
                category.clone(),
                allocation.budget_for(category),
                spent.get(category).copied().unwrap_or_default(),
            )
        })
        .collect()
}

/// How close spending is to a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetAlert {
    /// Below the alert threshold
    None,
    /// At or above the threshold, still under budget
    Approaching,
    /// At or over budget
    Exceeded,
}

impl BudgetAlert {
    /// Classify a progress percentage; `threshold` is the "approaching" mark
    pub fn from_progress(progress: u32, threshold: u32) -> Self {
        if progress >= EXCEEDED_PERCENT {
            Self::Exceeded
        } else if progress >= threshold {
            Self::Approaching
        } else {
            Self::None
        }
    }

    /// Notification-style title and message, if there is anything to say
    pub fn message(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::None => None,
            Self::Approaching => Some(("Budget Alert", "You're approaching your monthly budget!")),
            Self::Exceeded => Some(("Budget Exceeded", "You've exceeded your monthly budget!")),
        }
    }
}

impl fmt::Display for BudgetAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "On track"),
            Self::Approaching => write!(f, "Approaching"),
            Self::Exceeded => write!(f, "Exceeded"),
        }
    }
}

/// Progress of month spending against the monthly budget
pub fn monthly_progress(transactions: &[Transaction], budget: Money, month: MonthPeriod) -> u32 {
    progress_percentage(monthly_spending(transactions, month), budget)
}
