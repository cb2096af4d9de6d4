//! Storage layer for BudgetPal
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. [`Storage`] is the application's single store object: it is
//! created at startup and passed by reference to every service.

pub mod file_io;
pub mod preferences;
pub mod store;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic, write_text_atomic};
pub use preferences::{PreferenceData, PreferenceRepository};
pub use store::BudgetStore;
pub use transactions::TransactionRepository;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::paths::BudgetPalPaths;
use crate::error::{BudgetPalError, BudgetPalResult, ValidationError};
use crate::models::{BudgetAllocation, CategorySet, Money, Transaction, TransactionType};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetPalPaths,
    categories: CategorySet,
    pub transactions: TransactionRepository,
    pub preferences: PreferenceRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPalPaths, categories: CategorySet) -> Result<Self, BudgetPalError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            preferences: PreferenceRepository::new(paths.preferences_file()),
            categories,
            paths,
        })
    }

    /// Create and load in one step
    pub fn open(paths: BudgetPalPaths, categories: CategorySet) -> Result<Self, BudgetPalError> {
        let storage = Self::new(paths, categories)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &BudgetPalPaths {
        &self.paths
    }

    pub fn category_set(&self) -> &CategorySet {
        &self.categories
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), BudgetPalError> {
        self.transactions.load()?;
        self.preferences.load()?;
        debug!(base = %self.paths.base_dir().display(), "storage loaded");
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BudgetPalError> {
        self.transactions.save()?;
        self.preferences.save()?;
        Ok(())
    }
}

impl BudgetStore for Storage {
    fn transactions(&self) -> BudgetPalResult<Vec<Transaction>> {
        self.transactions.get_all()
    }

    fn save_transactions(&self, transactions: Vec<Transaction>) -> BudgetPalResult<()> {
        self.transactions.replace_all(transactions)
    }

    fn update_transactions<T, F>(&self, f: F) -> BudgetPalResult<T>
    where
        F: FnOnce(&mut Vec<Transaction>) -> BudgetPalResult<T>,
    {
        self.transactions.update(f)
    }

    fn monthly_budget(&self) -> BudgetPalResult<Money> {
        Ok(self.preferences.get()?.allocation.monthly_budget)
    }

    fn save_monthly_budget(&self, amount: Money) -> BudgetPalResult<()> {
        self.preferences.update(|p| {
            p.allocation.monthly_budget = amount;
            Ok(())
        })
    }

    fn category_budget(&self, category: &str) -> BudgetPalResult<Money> {
        Ok(self.preferences.get()?.allocation.budget_for(category))
    }

    fn save_category_budget(&self, category: &str, amount: Money) -> BudgetPalResult<()> {
        self.preferences.update(|p| {
            p.allocation
                .category_budgets
                .insert(category.to_string(), amount);
            Ok(())
        })
    }

    fn category_budgets(&self) -> BudgetPalResult<BTreeMap<String, Money>> {
        Ok(self.preferences.get()?.allocation.category_budgets)
    }

    fn allocation(&self) -> BudgetPalResult<BudgetAllocation> {
        Ok(self.preferences.get()?.allocation)
    }

    fn update_allocation<T, F>(&self, f: F) -> BudgetPalResult<T>
    where
        F: FnOnce(&mut BudgetAllocation) -> Result<T, ValidationError>,
    {
        self.preferences
            .update(|p| f(&mut p.allocation).map_err(BudgetPalError::from))
    }

    fn update_preferences<T, F>(&self, f: F) -> BudgetPalResult<T>
    where
        F: FnOnce(&mut PreferenceData) -> BudgetPalResult<T>,
    {
        self.preferences.update(f)
    }

    fn categories(&self, kind: TransactionType) -> Vec<String> {
        self.categories.for_kind(kind).to_vec()
    }

    fn selected_currency(&self) -> BudgetPalResult<String> {
        Ok(self.preferences.get()?.selected_currency)
    }

    fn set_selected_currency(&self, code: &str) -> BudgetPalResult<()> {
        self.preferences.update(|p| {
            p.selected_currency = code.to_string();
            Ok(())
        })
    }

    fn is_onboarding_completed(&self) -> BudgetPalResult<bool> {
        Ok(self.preferences.get()?.onboarding_completed)
    }

    fn set_onboarding_completed(&self, completed: bool) -> BudgetPalResult<()> {
        self.preferences.update(|p| {
            p.onboarding_completed = completed;
            Ok(())
        })
    }

    fn notifications_enabled(&self) -> BudgetPalResult<bool> {
        Ok(self.preferences.get()?.notifications_enabled)
    }

    fn set_notifications_enabled(&self, enabled: bool) -> BudgetPalResult<()> {
        self.preferences.update(|p| {
            p.notifications_enabled = enabled;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, CategorySet::default()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, _storage) = create_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
    }

    #[test]
    fn test_store_round_trip_through_disk() {
        let (temp_dir, storage) = create_storage();
        let txn = Transaction::expense(Money::from_units(12), "Food", Utc::now());

        storage.save_transactions(vec![txn.clone()]).unwrap();
        storage.save_monthly_budget(Money::from_units(900)).unwrap();
        storage
            .save_category_budget("Food", Money::from_units(200))
            .unwrap();
        storage.set_selected_currency("GBP").unwrap();
        storage.set_onboarding_completed(true).unwrap();
        storage.set_notifications_enabled(false).unwrap();

        let paths = BudgetPalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reopened = Storage::open(paths, CategorySet::default()).unwrap();

        assert_eq!(reopened.transactions().unwrap(), vec![txn]);
        assert_eq!(reopened.monthly_budget().unwrap(), Money::from_units(900));
        assert_eq!(reopened.category_budget("Food").unwrap(), Money::from_units(200));
        assert_eq!(reopened.category_budget("Housing").unwrap(), Money::zero());
        assert_eq!(reopened.selected_currency().unwrap(), "GBP");
        assert!(reopened.is_onboarding_completed().unwrap());
        assert!(!reopened.notifications_enabled().unwrap());
    }

    #[test]
    fn test_categories_by_kind() {
        let (_temp_dir, storage) = create_storage();
        let expense = storage.categories(TransactionType::Expense);
        let income = storage.categories(TransactionType::Income);
        assert!(expense.contains(&"Food".to_string()));
        assert!(income.iter().all(|c| !expense.contains(c)));
    }

    #[test]
    fn test_update_allocation_rejection_keeps_state() {
        let (_temp_dir, storage) = create_storage();
        storage.save_monthly_budget(Money::from_units(100)).unwrap();

        let err = storage
            .update_allocation(|a| a.set_category_budget("Food", Money::from_units(101)))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(storage.category_budget("Food").unwrap(), Money::zero());
    }
}
