//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. The list
//! keeps insertion order so that a restored list comes back exactly as it
//! was captured. Every mutation is written through to disk before the
//! in-memory copy changes.

use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{BudgetPalError, BudgetPalResult};
use crate::models::Transaction;

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> BudgetPalResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            BudgetPalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        debug!(count = file_data.transactions.len(), "loaded transactions");
        *data = file_data.transactions;

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> BudgetPalResult<()> {
        let data = self.data.read().map_err(|e| {
            BudgetPalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        write_json_atomic(
            &self.path,
            &TransactionData {
                transactions: data.clone(),
            },
        )
    }

    /// Apply a change to a draft of the list, persist it, then commit it
    ///
    /// If `f` fails or the write fails, nothing changes.
    pub fn update<T, F>(&self, f: F) -> BudgetPalResult<T>
    where
        F: FnOnce(&mut Vec<Transaction>) -> BudgetPalResult<T>,
    {
        let mut data = self.data.write().map_err(|e| {
            BudgetPalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut draft = data.clone();
        let out = f(&mut draft)?;

        write_json_atomic(
            &self.path,
            &TransactionData {
                transactions: draft.clone(),
            },
        )?;
        *data = draft;

        Ok(out)
    }

    /// Get all transactions in stored order
    pub fn get_all(&self) -> BudgetPalResult<Vec<Transaction>> {
        let data = self.data.read().map_err(|e| {
            BudgetPalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Replace the whole list
    pub fn replace_all(&self, transactions: Vec<Transaction>) -> BudgetPalResult<()> {
        self.update(move |data| {
            *data = transactions;
            Ok(())
        })
    }

    /// Count transactions
    pub fn count(&self) -> BudgetPalResult<usize> {
        let data = self.data.read().map_err(|e| {
            BudgetPalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
