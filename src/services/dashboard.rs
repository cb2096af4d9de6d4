//! Dashboard summary
//!
//! Collects the overview figures in one pass over the store: all-time
//! totals, the selected month's spending against the monthly budget, and the
//! per-category rows.

use tracing::debug;

use crate::error::BudgetPalResult;
use crate::models::{CategoryBudget, Money, MonthPeriod, TransactionType};
use crate::storage::BudgetStore;

use super::aggregator::{self, BudgetAlert};
use super::allocation::AllocationSummary;

/// Everything the overview screen shows
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub month: MonthPeriod,
    pub currency: String,
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
    pub month_income: Money,
    pub month_spending: Money,
    pub allocation: AllocationSummary,
    pub progress: u32,
    pub alert: BudgetAlert,
    /// Set only when notifications are enabled and the alert is not `None`
    pub notification: Option<(&'static str, &'static str)>,
    pub categories: Vec<CategoryBudget>,
}

/// Builds [`DashboardSummary`] values
pub struct DashboardService<'a, S: BudgetStore> {
    store: &'a S,
    alert_percent: u32,
}

impl<'a, S: BudgetStore> DashboardService<'a, S> {
    /// `alert_percent` is the "approaching" threshold from settings
    pub fn new(store: &'a S, alert_percent: u32) -> Self {
        Self {
            store,
            alert_percent,
        }
    }

    pub fn summary(&self, month: MonthPeriod) -> BudgetPalResult<DashboardSummary> {
        let transactions = self.store.transactions()?;
        let allocation = self.store.allocation()?;
        let categories = self.store.categories(TransactionType::Expense);

        let progress =
            aggregator::monthly_progress(&transactions, allocation.monthly_budget, month);
        let alert = BudgetAlert::from_progress(progress, self.alert_percent);
        let notification = if self.store.notifications_enabled()? {
            alert.message()
        } else {
            None
        };

        debug!(%month, progress, %alert, "dashboard computed");

        Ok(DashboardSummary {
            month,
            currency: self.store.selected_currency()?,
            total_income: aggregator::total_income(&transactions),
            total_expense: aggregator::total_expense(&transactions),
            balance: aggregator::balance(&transactions),
            month_income: aggregator::monthly_income(&transactions, month),
            month_spending: aggregator::monthly_spending(&transactions, month),
            allocation: AllocationSummary {
                monthly_budget: allocation.monthly_budget,
                total_allocated: allocation.total_allocated(),
                unallocated: allocation.unallocated(),
            },
            progress,
            alert,
            notification,
            categories: aggregator::category_budgets(&transactions, &categories, &allocation, month),
        })
    }
}
