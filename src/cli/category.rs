//! Category CLI commands
//!
//! Lists the configured categories and shows spending per category.

use clap::Subcommand;

use crate::error::BudgetPalResult;
use crate::models::{Money, TransactionType};
use crate::services::aggregator;
use crate::storage::{BudgetStore, Storage};

use super::{parse_kind, parse_period};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List configured categories
    List {
        /// Only show one kind ("expense" or "income")
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Show expenses per category for a month
    Spending {
        /// Month (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
        /// Only show one category (case-sensitive)
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> BudgetPalResult<()> {
    match cmd {
        CategoryCommands::List { kind } => {
            let kinds = match kind {
                Some(k) => vec![parse_kind(&k)?],
                None => vec![TransactionType::Expense, TransactionType::Income],
            };

            for kind in kinds {
                println!("{} categories:", kind);
                for name in storage.categories(kind) {
                    let budget = storage.category_budget(&name)?;
                    if kind == TransactionType::Expense && !budget.is_zero() {
                        println!("  {:20} budget {}", name, budget);
                    } else {
                        println!("  {}", name);
                    }
                }
            }
        }

        CategoryCommands::Spending { period, category } => {
            let month = parse_period(period.as_deref())?;
            let transactions = storage.transactions()?;

            if let Some(category) = category {
                let spent = aggregator::category_spending(&transactions, &category, month);
                println!("{} in {}: {}", category, month.friendly(), spent);
                return Ok(());
            }

            let map = aggregator::category_spending_map(&transactions, month);
            if map.is_empty() {
                println!("No expenses in {}.", month.friendly());
                return Ok(());
            }

            println!("Spending by category: {}", month.friendly());
            println!("{}", "-".repeat(36));
            for (name, amount) in &map {
                println!("  {:20} {:>12}", name, amount);
            }
            let total: Money = map.values().sum();
            println!("{}", "-".repeat(36));
            println!("  {:20} {:>12}", "Total", total);
        }
    }

    Ok(())
}
