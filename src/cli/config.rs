//! Config CLI commands
//!
//! Shows paths and settings, and changes the currency and notification
//! preferences.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{BudgetPalError, BudgetPalResult};
use crate::models::SUPPORTED_CURRENCIES;
use crate::services::PreferenceService;
use crate::storage::Storage;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Select the display currency
    Currency {
        /// Three-letter code (e.g., "USD"); omit to list supported codes
        code: Option<String>,
    },

    /// Turn budget alerts on or off
    Notifications {
        /// "on" or "off"
        state: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ConfigCommands,
) -> BudgetPalResult<()> {
    let service = PreferenceService::new(storage);
    let paths = storage.paths();

    match cmd {
        ConfigCommands::Show => {
            println!("BudgetPal Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency:          {}", service.currency()?);
            println!(
                "  Notifications:     {}",
                if service.notifications_enabled()? { "on" } else { "off" }
            );
            println!("  Alert threshold:   {}%", settings.budget_alert_percent);
            println!("  Date format:       {}", settings.date_format);
            println!(
                "  Expense categories: {}",
                settings.categories.expense.join(", ")
            );
            println!(
                "  Income categories:  {}",
                settings.categories.income.join(", ")
            );
        }

        ConfigCommands::Currency { code: None } => {
            println!("Current currency: {}", service.currency()?);
            println!("Supported: {}", SUPPORTED_CURRENCIES.join(", "));
        }

        ConfigCommands::Currency { code: Some(code) } => {
            let selected = service.set_currency(&code)?;
            println!("Currency set to {}", selected);
        }

        ConfigCommands::Notifications { state } => {
            let enabled = match state.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                other => {
                    return Err(BudgetPalError::Config(format!(
                        "Expected 'on' or 'off', got '{}'",
                        other
                    )))
                }
            };
            service.set_notifications(enabled)?;
            println!("Notifications {}", if enabled { "enabled" } else { "disabled" });
        }
    }

    Ok(())
}
