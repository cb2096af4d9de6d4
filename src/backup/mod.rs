//! Backup system for BudgetPal
//!
//! Snapshots of the whole store written as JSON artifacts, and all-or-nothing
//! restore from them.
//!
//! # Architecture
//!
//! - `BackupSnapshot`: the captured state and its JSON codec
//! - `BackupManager`: writes and lists artifacts
//! - `RestoreManager`: validates and applies snapshots
//!
//! # Backup Format
//!
//! Each artifact is a JSON object with these keys:
//! - `transactions`: every transaction, dates as epoch milliseconds
//! - `budgets`: `{category, amount}` for each expense category
//! - `settings`: `monthly_budget`, `category_budgets`, `selected_currency`,
//!   `onboarding_completed`
//! - `timestamp`: creation time in epoch milliseconds
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetpal::backup::{BackupManager, RestoreManager};
//!
//! let backups = BackupManager::new(&storage, paths.backup_dir());
//! let path = backups.create_backup()?;
//!
//! // Later, restore from backup
//! let restore = RestoreManager::new(&storage, paths.backup_dir());
//! let result = restore.restore_from_file(&path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;
mod snapshot;

pub use manager::{artifact_name, is_backup_name, BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult};
pub use snapshot::{BackupSettings, BackupSnapshot, BudgetEntry};
