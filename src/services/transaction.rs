//! Transaction service
//!
//! Add, edit and delete flows. Amounts must be positive and categories must
//! belong to the configured list for the transaction type. Edits replace the
//! whole record but keep its id and original date.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{BudgetPalError, BudgetPalResult, ValidationError};
use crate::models::{Money, Transaction, TransactionId, TransactionType};
use crate::storage::BudgetStore;

use super::allocation::parse_amount;

/// Input for adding or editing a transaction
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub kind: TransactionType,
    pub amount: Money,
    pub category: String,
    pub description: String,
}

impl TransactionInput {
    pub fn new(kind: TransactionType, amount: Money, category: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: String::new(),
        }
    }

    /// Build from a raw amount string as typed by a user
    pub fn parse(
        kind: TransactionType,
        amount: &str,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(kind, parse_amount(amount)?, category))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Service for transaction management
pub struct TransactionService<'a, S: BudgetStore> {
    store: &'a S,
}

impl<'a, S: BudgetStore> TransactionService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn validate(&self, input: &TransactionInput) -> Result<(), ValidationError> {
        if !input.amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount(input.amount));
        }

        let known = self.store.categories(input.kind);
        if !known.iter().any(|c| c == &input.category) {
            return Err(ValidationError::UnknownCategory {
                category: input.category.clone(),
                kind: input.kind.label().to_string(),
            });
        }
        Ok(())
    }

    /// Record a new transaction dated `date`
    pub fn add(&self, input: TransactionInput, date: DateTime<Utc>) -> BudgetPalResult<Transaction> {
        if let Err(e) = self.validate(&input) {
            warn!(error = %e, "transaction rejected");
            return Err(e.into());
        }

        let txn = Transaction::new(
            input.kind,
            input.amount,
            input.category,
            input.description,
            date,
        );

        self.store.update_transactions(|all| {
            all.push(txn.clone());
            Ok(())
        })?;

        info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, category = %txn.category, "transaction added");
        Ok(txn)
    }

    /// Replace a transaction, keeping its id and date
    pub fn edit(&self, id: &TransactionId, input: TransactionInput) -> BudgetPalResult<Transaction> {
        if let Err(e) = self.validate(&input) {
            warn!(%id, error = %e, "transaction edit rejected");
            return Err(e.into());
        }

        let updated = self.store.update_transactions(|all| {
            let slot = all
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| BudgetPalError::transaction_not_found(id.as_str()))?;

            slot.amount = input.amount;
            slot.category = input.category;
            slot.kind = input.kind;
            slot.description = input.description;
            Ok(slot.clone())
        })?;

        info!(%id, "transaction edited");
        Ok(updated)
    }

    /// Delete a transaction by id
    pub fn delete(&self, id: &TransactionId) -> BudgetPalResult<Transaction> {
        let removed = self.store.update_transactions(|all| {
            let index = all
                .iter()
                .position(|t| &t.id == id)
                .ok_or_else(|| BudgetPalError::transaction_not_found(id.as_str()))?;
            Ok(all.remove(index))
        })?;
        info!(%id, "transaction deleted");
        Ok(removed)
    }

    /// Find a transaction by full id or unique id prefix
    pub fn find(&self, id_or_prefix: &str) -> BudgetPalResult<Transaction> {
        let all = self.store.transactions()?;

        if let Some(exact) = all.iter().find(|t| t.id.as_str() == id_or_prefix) {
            return Ok(exact.clone());
        }

        let mut matches = all.into_iter().filter(|t| t.id.matches_prefix(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found),
            (Some(_), Some(_)) => Err(BudgetPalError::AmbiguousId {
                entity_type: "Transaction",
                prefix: id_or_prefix.to_string(),
            }),
            (None, _) => Err(BudgetPalError::transaction_not_found(id_or_prefix)),
        }
    }

    /// All transactions, newest first
    pub fn list(&self) -> BudgetPalResult<Vec<Transaction>> {
        let mut all = self.store.transactions()?;
        all.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPalPaths;
    use crate::models::CategorySet;
    use crate::storage::Storage;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, CategorySet::default()).unwrap();
        (temp_dir, storage)
    }

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 5, 10, 0, 0).unwrap()
    }

    fn food(units: i64) -> TransactionInput {
        TransactionInput::new(TransactionType::Expense, Money::from_units(units), "Food")
    }

    #[test]
    fn test_add() {
        let (_temp, storage) = create_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .add(food(12).with_description("lunch"), date())
            .unwrap();

        let stored = storage.transactions().unwrap();
        assert_eq!(stored, vec![txn.clone()]);
        assert_eq!(txn.description, "lunch");
        assert_eq!(txn.date, date());
    }

    #[test]
    fn test_add_rejects_non_positive_amounts() {
        let (_temp, storage) = create_storage();
        let service = TransactionService::new(&storage);

        for amount in [0, -5] {
            let err = service.add(food(amount), date()).unwrap_err();
            assert!(matches!(
                err.as_validation(),
                Some(ValidationError::NonPositiveAmount(_))
            ));
        }
        assert!(storage.transactions().unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_category_of_wrong_kind() {
        let (_temp, storage) = create_storage();
        let service = TransactionService::new(&storage);

        let input = TransactionInput::new(TransactionType::Income, Money::from_units(5), "Food");
        let err = service.add(input, date()).unwrap_err();
        assert!(matches!(
            err.as_validation(),
            Some(ValidationError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_parse_input() {
        let input = TransactionInput::parse(TransactionType::Expense, "12.5", "Food").unwrap();
        assert_eq!(input.amount, Money::from_cents(1250));

        let err = TransactionInput::parse(TransactionType::Expense, "12,5x", "Food").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount(_)));
    }

    #[test]
    fn test_edit_preserves_id_and_date() {
        let (_temp, storage) = create_storage();
        let service = TransactionService::new(&storage);
        let original = service.add(food(12), date()).unwrap();

        let replacement =
            TransactionInput::new(TransactionType::Income, Money::from_units(900), "Salary")
                .with_description("June pay");
        let edited = service.edit(&original.id, replacement).unwrap();

        assert_eq!(edited.id, original.id);
        assert_eq!(edited.date, original.date);
        assert_eq!(edited.kind, TransactionType::Income);
        assert_eq!(edited.description, "June pay");
        assert_eq!(storage.transactions().unwrap(), vec![edited]);
    }

    #[test]
    fn test_edit_rejected_leaves_original() {
        let (_temp, storage) = create_storage();
        let service = TransactionService::new(&storage);
        let original = service.add(food(12), date()).unwrap();

        assert!(service.edit(&original.id, food(0)).is_err());
        assert_eq!(storage.transactions().unwrap(), vec![original]);
    }

    #[test]
    fn test_edit_and_delete_unknown_id() {
        let (_temp, storage) = create_storage();
        let service = TransactionService::new(&storage);
        let missing = TransactionId::from_string("nope");

        assert!(service.edit(&missing, food(1)).unwrap_err().is_not_found());
        assert!(service.delete(&missing).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_storage();
        let service = TransactionService::new(&storage);
        let keep = service.add(food(1), date()).unwrap();
        let drop = service.add(food(2), date()).unwrap();

        let removed = service.delete(&drop.id).unwrap();
        assert_eq!(removed.id, drop.id);
        assert_eq!(storage.transactions().unwrap(), vec![keep]);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp, storage) = create_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(food(1), date()).unwrap();

        let found = service.find(txn.id.short()).unwrap();
        assert_eq!(found.id, txn.id);
        assert!(service.find("zzzzzzzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_with_shared_prefix_is_ambiguous() {
        let (_temp, storage) = create_storage();
        let mut first = Transaction::expense(Money::from_units(1), "Food", date());
        first.id = TransactionId::from_string("abc-1");
        let mut second = Transaction::expense(Money::from_units(2), "Food", date());
        second.id = TransactionId::from_string("abc-2");
        storage.save_transactions(vec![first, second]).unwrap();

        let service = TransactionService::new(&storage);
        let err = service.find("abc").unwrap_err();
        assert!(matches!(
            err,
            BudgetPalError::AmbiguousId { entity_type: "Transaction", ref prefix } if prefix == "abc"
        ));
        assert!(!err.is_not_found());
        assert_eq!(service.find("abc-2").unwrap().amount, Money::from_units(2));
    }

    #[test]
    fn test_list_is_newest_first() {
        let (_temp, storage) = create_storage();
        let service = TransactionService::new(&storage);
        let older = service.add(food(1), date()).unwrap();
        let newer = service.add(food(2), date() + Duration::days(3)).unwrap();

        let listed = service.list().unwrap();
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }
}
