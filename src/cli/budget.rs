//! Budget CLI commands
//!
//! Implements CLI commands for the monthly budget and category allocations.

use clap::Subcommand;

use crate::display::{format_allocation, format_category_budgets};
use crate::error::BudgetPalResult;
use crate::models::{CategoryBudget, MonthPeriod, TransactionType};
use crate::services::{aggregator, AllocationService};
use crate::storage::{BudgetStore, Storage};

use super::parse_period;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the monthly budget and category allocations
    Show {
        /// Month (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Set the overall monthly budget
    Set {
        /// Amount (e.g., "1000" or "1,000.00")
        amount: String,
    },

    /// Set the budget of one expense category
    Assign {
        /// Category name (case-sensitive)
        category: String,
        /// Amount (e.g., "100" or "100.00")
        amount: String,
    },

    /// Show categories that are over budget
    Overspent {
        /// Month (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> BudgetPalResult<()> {
    let service = AllocationService::new(storage);
    let currency = storage.selected_currency()?;

    match cmd {
        BudgetCommands::Show { period } => {
            let month = parse_period(period.as_deref())?;
            let rows = category_rows(storage, month)?;

            println!("Budget: {}", month.friendly());
            println!("{}", "=".repeat(48));
            print!("{}", format_allocation(&service.summary()?, &currency));
            println!();
            println!("{}", format_category_budgets(&rows));
        }

        BudgetCommands::Set { amount } => {
            service.set_monthly_budget_input(&amount)?;
            println!("Monthly budget set.");
            print!("{}", format_allocation(&service.summary()?, &currency));
        }

        BudgetCommands::Assign { category, amount } => {
            service.set_category_budget_input(&category, &amount)?;
            println!(
                "Assigned {} to '{}'.",
                storage.category_budget(&category)?.format_with_code(&currency),
                category
            );
            print!("{}", format_allocation(&service.summary()?, &currency));
        }

        BudgetCommands::Overspent { period } => {
            let month = parse_period(period.as_deref())?;
            let overspent: Vec<_> = category_rows(storage, month)?
                .into_iter()
                .filter(|row| row.is_overspent())
                .collect();

            if overspent.is_empty() {
                println!("No overspent categories in {}.", month.friendly());
            } else {
                println!("Overspent in {}:", month.friendly());
                println!("{}", format_category_budgets(&overspent));
            }
        }
    }

    Ok(())
}

fn category_rows(storage: &Storage, month: MonthPeriod) -> BudgetPalResult<Vec<CategoryBudget>> {
    Ok(aggregator::category_budgets(
        &storage.transactions()?,
        &storage.categories(TransactionType::Expense),
        &storage.allocation()?,
        month,
    ))
}
