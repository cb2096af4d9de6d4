//! Backup restoration for BudgetPal
//!
//! Restores are all-or-nothing. The payload is decoded and the resulting
//! budget allocation is checked before anything is written; if a later write
//! fails, the previous transactions and budgets are put back.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{BudgetPalError, BudgetPalResult, CodecError, ValidationError};
use crate::models::{BudgetAllocation, Money, TransactionType};
use crate::storage::BudgetStore;

use super::snapshot::BackupSnapshot;

/// Applies snapshots to a store
pub struct RestoreManager<'a, S: BudgetStore> {
    store: &'a S,
    backup_dir: PathBuf,
}

impl<'a, S: BudgetStore> RestoreManager<'a, S> {
    pub fn new(store: &'a S, backup_dir: PathBuf) -> Self {
        Self { store, backup_dir }
    }

    /// Restore a named artifact from the backup directory
    pub fn restore_artifact(&self, filename: &str) -> BudgetPalResult<RestoreResult> {
        let path = self.backup_dir.join(filename);
        if !path.is_file() {
            return Err(CodecError::ArtifactNotFound(filename.to_string()).into());
        }
        self.restore_from_file(&path)
    }

    /// Restore data from a backup file at any path
    pub fn restore_from_file(&self, backup_path: &Path) -> BudgetPalResult<RestoreResult> {
        let snapshot = read_snapshot(backup_path)?;
        self.restore(&snapshot)
    }

    /// Decode a backup without applying it
    pub fn inspect(&self, backup_path: &Path) -> BudgetPalResult<RestoreResult> {
        let snapshot = read_snapshot(backup_path)?;
        Ok(RestoreResult::of(&snapshot))
    }

    /// Apply a snapshot to the store
    ///
    /// Transactions are replaced wholesale. Each budget entry overwrites that
    /// category's budget; categories not in the snapshot keep theirs. Settings
    /// keys missing from the snapshot are left alone. Nothing is written if
    /// a transaction breaks the transaction rules or the result would break
    /// the allocation rules.
    pub fn restore(&self, snapshot: &BackupSnapshot) -> BudgetPalResult<RestoreResult> {
        if let Err(e) = self.check(snapshot) {
            warn!(error = %e, "backup rejected");
            return Err(e);
        }

        let previous = self.store.transactions()?;
        self.store
            .save_transactions(snapshot.transactions.clone())?;

        // Budgets and settings commit together, re-checked under the lock
        let applied = self.store.update_preferences(|prefs| {
            prefs.allocation = apply_budgets(prefs.allocation.clone(), snapshot)?;
            if let Some(currency) = &snapshot.settings.selected_currency {
                prefs.selected_currency = currency.clone();
            }
            if let Some(completed) = snapshot.settings.onboarding_completed {
                prefs.onboarding_completed = completed;
            }
            Ok(())
        });

        if let Err(e) = applied {
            warn!(error = %e, "restore failed, putting previous transactions back");
            if let Err(rollback) = self.store.save_transactions(previous) {
                warn!(error = %rollback, "could not put previous transactions back");
            }
            return Err(e);
        }

        let result = RestoreResult::of(snapshot);
        info!(
            transactions = result.transaction_count,
            budgets = result.budget_count,
            "backup restored"
        );
        Ok(result)
    }

    /// Everything a restore checks before its first write
    fn check(&self, snapshot: &BackupSnapshot) -> BudgetPalResult<()> {
        let expense = self.store.categories(TransactionType::Expense);
        let income = self.store.categories(TransactionType::Income);
        let mut ids = HashSet::new();

        for txn in &snapshot.transactions {
            if !txn.amount.is_positive() {
                return Err(ValidationError::NonPositiveAmount(txn.amount).into());
            }
            let known = match txn.kind {
                TransactionType::Expense => &expense,
                TransactionType::Income => &income,
            };
            if !known.iter().any(|c| c == &txn.category) {
                return Err(ValidationError::UnknownCategory {
                    category: txn.category.clone(),
                    kind: txn.kind.label().to_string(),
                }
                .into());
            }
            if !ids.insert(txn.id.as_str()) {
                return Err(CodecError::MalformedPayload(format!(
                    "duplicate transaction id '{}'",
                    txn.id
                ))
                .into());
            }
        }

        apply_budgets(self.store.allocation()?, snapshot)?;
        Ok(())
    }
}

/// The allocation that restoring `snapshot` over `current` would produce
fn apply_budgets(
    mut current: BudgetAllocation,
    snapshot: &BackupSnapshot,
) -> Result<BudgetAllocation, ValidationError> {
    for entry in &snapshot.budgets {
        current
            .category_budgets
            .insert(entry.category.clone(), entry.amount);
    }
    if let Some(monthly) = snapshot.settings.monthly_budget {
        current.monthly_budget = monthly;
    }
    current.validate()?;
    Ok(current)
}

fn read_snapshot(path: &Path) -> BudgetPalResult<BackupSnapshot> {
    if !path.is_file() {
        return Err(CodecError::ArtifactNotFound(path.display().to_string()).into());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| BudgetPalError::Io(format!("Failed to read backup file: {}", e)))?;

    Ok(BackupSnapshot::deserialize(&contents)?)
}

/// Summary of a restored or inspected backup
#[derive(Debug, Clone)]
pub struct RestoreResult {
    /// When the backup was taken
    pub backup_date: DateTime<Utc>,
    pub transaction_count: usize,
    pub budget_count: usize,
    pub monthly_budget: Option<Money>,
    pub currency: Option<String>,
}

impl RestoreResult {
    fn of(snapshot: &BackupSnapshot) -> Self {
        Self {
            backup_date: snapshot.timestamp,
            transaction_count: snapshot.transactions.len(),
            budget_count: snapshot.budgets.len(),
            monthly_budget: snapshot.settings.monthly_budget,
            currency: snapshot.settings.selected_currency.clone(),
        }
    }

    /// Get a summary of the backup contents
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("{} transactions", self.transaction_count),
            format!("{} category budgets", self.budget_count),
        ];
        if let Some(monthly) = self.monthly_budget {
            parts.push(format!("monthly budget {}", monthly));
        }
        if let Some(currency) = &self.currency {
            parts.push(format!("currency {}", currency));
        }
        parts.join(", ")
    }
}
