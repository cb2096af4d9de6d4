//! Preference repository for JSON storage
//!
//! Holds the single-valued user state in preferences.json: the monthly
//! budget and category budgets, the selected currency, and the onboarding
//! and notification flags.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BudgetPalError, BudgetPalResult};
use crate::models::{BudgetAllocation, DEFAULT_CURRENCY};

use super::file_io::{read_json, write_json_atomic};

/// Serializable preference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceData {
    #[serde(flatten)]
    pub allocation: BudgetAllocation,

    #[serde(default = "default_currency")]
    pub selected_currency: String,

    #[serde(default)]
    pub onboarding_completed: bool,

    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PreferenceData {
    fn default() -> Self {
        Self {
            allocation: BudgetAllocation::default(),
            selected_currency: default_currency(),
            onboarding_completed: false,
            notifications_enabled: true,
        }
    }
}

/// Repository for preference persistence
pub struct PreferenceRepository {
    path: PathBuf,
    data: RwLock<PreferenceData>,
}

impl PreferenceRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(PreferenceData::default()),
        }
    }

    /// Load preferences from disk
    pub fn load(&self) -> BudgetPalResult<()> {
        let file_data: PreferenceData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            BudgetPalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        debug!(
            monthly_budget = %file_data.allocation.monthly_budget,
            categories = file_data.allocation.category_budgets.len(),
            "loaded preferences"
        );
        *data = file_data;

        Ok(())
    }

    /// Save preferences to disk
    pub fn save(&self) -> BudgetPalResult<()> {
        let data = self.data.read().map_err(|e| {
            BudgetPalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        write_json_atomic(&self.path, &*data)
    }

    /// Snapshot of the current preferences
    pub fn get(&self) -> BudgetPalResult<PreferenceData> {
        let data = self.data.read().map_err(|e| {
            BudgetPalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Apply a change to a draft, persist it, then commit it
    ///
    /// Runs under the write lock, so a check made inside `f` still holds
    /// when the result is committed. If `f` fails or the write fails,
    /// nothing changes.
    pub fn update<T, F>(&self, f: F) -> BudgetPalResult<T>
    where
        F: FnOnce(&mut PreferenceData) -> BudgetPalResult<T>,
    {
        let mut data = self.data.write().map_err(|e| {
            BudgetPalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut draft = data.clone();
        let out = f(&mut draft)?;

        if draft != *data {
            write_json_atomic(&self.path, &draft)?;
            *data = draft;
        }

        Ok(out)
    }
}
