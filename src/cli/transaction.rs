//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{BudgetPalError, BudgetPalResult};
use crate::services::{parse_amount, TransactionInput, TransactionService};
use crate::storage::{BudgetStore, Storage};

use super::{parse_kind, parse_period};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// "expense" or "income"
        kind: String,
        /// Amount, always positive (e.g., "12.50")
        amount: String,
        /// Category name (case-sensitive)
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Only show one month (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
        /// Filter by category name
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show transaction details
    Show {
        /// Transaction ID or ID prefix
        id: String,
    },

    /// Replace a transaction; unspecified fields keep their values
    Edit {
        /// Transaction ID or ID prefix
        id: String,
        /// New type ("expense" or "income")
        #[arg(short, long)]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID or ID prefix
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BudgetPalResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            description,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Utc::now(),
            };
            let input = TransactionInput::parse(parse_kind(&kind)?, &amount, category)?
                .with_description(description.unwrap_or_default());

            let txn = service.add(input, date)?;
            println!("Added {} of {} to {}", txn.kind, txn.amount, txn.category);
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List {
            period,
            category,
            limit,
        } => {
            let month = period.as_deref().map(|p| parse_period(Some(p))).transpose()?;

            let transactions: Vec<_> = service
                .list()?
                .into_iter()
                .filter(|t| month.map_or(true, |m| m.contains(&t.date)))
                .filter(|t| category.as_ref().map_or(true, |c| &t.category == c))
                .take(limit)
                .collect();

            println!(
                "{}",
                format_transaction_table(&transactions, &settings.date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.find(&id)?;
            print!(
                "{}",
                format_transaction_details(&txn, &storage.selected_currency()?)
            );
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            description,
        } => {
            let existing = service.find(&id)?;

            let input = TransactionInput {
                kind: match kind {
                    Some(k) => parse_kind(&k)?,
                    None => existing.kind,
                },
                amount: match amount {
                    Some(a) => parse_amount(&a)?,
                    None => existing.amount,
                },
                category: category.unwrap_or_else(|| existing.category.clone()),
                description: description.unwrap_or_else(|| existing.description.clone()),
            };

            let txn = service.edit(&existing.id, input)?;
            println!("Updated transaction {}", txn.id.short());
            print!(
                "{}",
                format_transaction_details(&txn, &storage.selected_currency()?)
            );
        }

        TransactionCommands::Delete { id } => {
            let existing = service.find(&id)?;
            let removed = service.delete(&existing.id)?;
            println!("Deleted transaction {} ({})", removed.id.short(), removed);
        }
    }

    Ok(())
}

/// Parse `YYYY-MM-DD` as the start of that day in local time
fn parse_date(s: &str) -> BudgetPalResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetPalError::Config(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })?;

    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| BudgetPalError::Config(format!("Date '{}' does not exist locally", s)))
}
