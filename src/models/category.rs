//! Categories and per-category budget figures
//!
//! Expense and income categories are two disjoint, ordered name lists. Only
//! expense categories carry budgets.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::transaction::TransactionType;

/// The configured category names, split by transaction type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    #[serde(default = "default_expense_categories")]
    pub expense: Vec<String>,

    #[serde(default = "default_income_categories")]
    pub income: Vec<String>,
}

fn default_expense_categories() -> Vec<String> {
    [
        "Food",
        "Transportation",
        "Housing",
        "Utilities",
        "Entertainment",
        "Shopping",
        "Healthcare",
        "Education",
        "Gifts",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_income_categories() -> Vec<String> {
    ["Salary", "Business", "Investment", "Freelance"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            expense: default_expense_categories(),
            income: default_income_categories(),
        }
    }
}

impl CategorySet {
    /// Names configured for a transaction type
    pub fn for_kind(&self, kind: TransactionType) -> &[String] {
        match kind {
            TransactionType::Expense => &self.expense,
            TransactionType::Income => &self.income,
        }
    }

    /// Exact, case-sensitive membership check
    pub fn contains(&self, kind: TransactionType, category: &str) -> bool {
        self.for_kind(kind).iter().any(|c| c == category)
    }

    /// Check that names are non-empty, unique, and that the two lists
    /// do not share a name
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for name in self.expense.iter().chain(self.income.iter()) {
            if name.trim().is_empty() {
                return Err("category names cannot be empty".into());
            }
            if !seen.insert(name.as_str()) {
                return Err(format!("category '{}' is configured more than once", name));
            }
        }
        Ok(())
    }
}

/// Budget figures for one category in one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBudget {
    pub category: String,
    pub budget_amount: Money,
    /// Expenses in this category for the month; derived, never stored
    pub spent_amount: Money,
}

impl CategoryBudget {
    pub fn new(category: impl Into<String>, budget_amount: Money, spent_amount: Money) -> Self {
        Self {
            category: category.into(),
            budget_amount,
            spent_amount,
        }
    }

    /// Budget left; negative when overspent
    pub fn remaining_amount(&self) -> Money {
        self.budget_amount - self.spent_amount
    }

    /// Percentage of the budget spent, not clamped at 100
    pub fn progress(&self) -> u32 {
        progress_percentage(self.spent_amount, self.budget_amount)
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining_amount().is_negative()
    }
}

/// `floor(spent / budget * 100)`, or 0 when there is no budget
///
/// Values above 100 are meaningful: they mean the budget was exceeded.
pub fn progress_percentage(spent: Money, budget: Money) -> u32 {
    if !budget.is_positive() || !spent.is_positive() {
        return 0;
    }
    let pct = (spent.cents() as i128 * 100) / budget.cents() as i128;
    u32::try_from(pct).unwrap_or(u32::MAX)
}
