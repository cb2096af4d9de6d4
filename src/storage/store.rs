//! The store interface the budget core is written against
//!
//! Services and the backup code only see [`BudgetStore`]. The setters here
//! are raw: they persist what they are given. Budget rules live in
//! `services::allocation`, which commits through [`BudgetStore::update_allocation`].

use std::collections::BTreeMap;

use crate::error::{BudgetPalResult, ValidationError};
use crate::models::{BudgetAllocation, Money, Transaction, TransactionType};

use super::preferences::PreferenceData;

/// Read/write access to transactions and preferences
pub trait BudgetStore {
    /// All transactions in stored order
    fn transactions(&self) -> BudgetPalResult<Vec<Transaction>>;

    /// Replace the stored transaction list
    fn save_transactions(&self, transactions: Vec<Transaction>) -> BudgetPalResult<()>;

    /// Atomically read, change and persist the transaction list
    fn update_transactions<T, F>(&self, f: F) -> BudgetPalResult<T>
    where
        F: FnOnce(&mut Vec<Transaction>) -> BudgetPalResult<T>;

    fn monthly_budget(&self) -> BudgetPalResult<Money>;

    fn save_monthly_budget(&self, amount: Money) -> BudgetPalResult<()>;

    /// Budget of one category, zero when unset
    fn category_budget(&self, category: &str) -> BudgetPalResult<Money>;

    fn save_category_budget(&self, category: &str, amount: Money) -> BudgetPalResult<()>;

    /// Every category that has a budget set
    fn category_budgets(&self) -> BudgetPalResult<BTreeMap<String, Money>>;

    /// Monthly budget and every category budget
    fn allocation(&self) -> BudgetPalResult<BudgetAllocation>;

    /// Atomically read, change and persist the allocation
    ///
    /// `f` works on a copy; the copy is committed only if `f` returns `Ok`
    /// and nothing else can change the allocation in between.
    fn update_allocation<T, F>(&self, f: F) -> BudgetPalResult<T>
    where
        F: FnOnce(&mut BudgetAllocation) -> Result<T, ValidationError>;

    /// Atomically read, change and persist every preference at once
    ///
    /// Budgets, currency and flags changed inside `f` are committed together
    /// or not at all.
    fn update_preferences<T, F>(&self, f: F) -> BudgetPalResult<T>
    where
        F: FnOnce(&mut PreferenceData) -> BudgetPalResult<T>;

    /// Configured category names for a transaction type
    fn categories(&self, kind: TransactionType) -> Vec<String>;

    fn selected_currency(&self) -> BudgetPalResult<String>;

    fn set_selected_currency(&self, code: &str) -> BudgetPalResult<()>;

    fn is_onboarding_completed(&self) -> BudgetPalResult<bool>;

    fn set_onboarding_completed(&self, completed: bool) -> BudgetPalResult<()>;

    fn notifications_enabled(&self) -> BudgetPalResult<bool>;

    fn set_notifications_enabled(&self, enabled: bool) -> BudgetPalResult<()>;
}
