//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod budget;
pub mod category;
pub mod config;
pub mod summary;
pub mod transaction;

pub use backup::{handle_backup_command, BackupCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use summary::handle_summary_command;
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{BudgetPalError, BudgetPalResult};
use crate::models::{MonthPeriod, TransactionType};

/// Parse an optional month argument, defaulting to the current month
pub(crate) fn parse_period(period: Option<&str>) -> BudgetPalResult<MonthPeriod> {
    match period {
        Some(p) => MonthPeriod::parse(p)
            .map_err(|e| BudgetPalError::Config(format!("Invalid period: {}", e))),
        None => Ok(MonthPeriod::current()),
    }
}

pub(crate) fn parse_kind(kind: &str) -> BudgetPalResult<TransactionType> {
    kind.parse().map_err(BudgetPalError::Config)
}
