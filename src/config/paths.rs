//! Path management for BudgetPal
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGETPAL_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/budgetpal` on Linux, `~/Library/Application Support/...`
//!    on macOS, `%APPDATA%\...` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BudgetPalError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BUDGETPAL_DATA_DIR";

/// Manages all paths used by BudgetPal
#[derive(Debug, Clone)]
pub struct BudgetPalPaths {
    /// Base directory for all BudgetPal data
    base_dir: PathBuf,
}

impl BudgetPalPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BudgetPalError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Backup directory (<base>/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Path to preferences.json (budgets, currency, flags)
    pub fn preferences_file(&self) -> PathBuf {
        self.data_dir().join("preferences.json")
    }

    /// Ensure the base, data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), BudgetPalError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgetPalError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BudgetPalError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir()).map_err(|e| {
            BudgetPalError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        Ok(())
    }

    /// Whether `init` has been run here
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BudgetPalError> {
    ProjectDirs::from("", "", "budgetpal")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BudgetPalError::Config("Could not determine home directory".into()))
}
