//! Budget allocation service
//!
//! Keeps the monthly budget and the category budgets consistent. Each change
//! is checked and committed in one step through
//! [`BudgetStore::update_allocation`]; a rejected change leaves both values
//! as they were.

use tracing::{info, warn};

use crate::error::{BudgetPalResult, ValidationError};
use crate::models::{Money, TransactionType};
use crate::storage::BudgetStore;

/// Monthly budget, how much of it is given to categories, and the rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationSummary {
    pub monthly_budget: Money,
    pub total_allocated: Money,
    pub unallocated: Money,
}

/// Service for budget allocation
pub struct AllocationService<'a, S: BudgetStore> {
    store: &'a S,
}

impl<'a, S: BudgetStore> AllocationService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Set the monthly budget
    ///
    /// Fails with `BudgetBelowAllocated` if categories already hold more
    /// than `amount`.
    pub fn set_monthly_budget(&self, amount: Money) -> BudgetPalResult<()> {
        let result = self
            .store
            .update_allocation(|allocation| allocation.set_monthly_budget(amount));

        match &result {
            Ok(()) => info!(%amount, "monthly budget updated"),
            Err(e) => warn!(%amount, error = %e, "monthly budget rejected"),
        }
        result
    }

    /// Set the budget of one expense category
    ///
    /// Fails with `AllocationExceedsMonthly` if the other categories plus
    /// `amount` would exceed the monthly budget.
    pub fn set_category_budget(&self, category: &str, amount: Money) -> BudgetPalResult<()> {
        if !self
            .store
            .categories(TransactionType::Expense)
            .iter()
            .any(|c| c == category)
        {
            let err = ValidationError::UnknownCategory {
                category: category.to_string(),
                kind: TransactionType::Expense.label().to_string(),
            };
            warn!(category, error = %err, "category budget rejected");
            return Err(err.into());
        }

        let result = self
            .store
            .update_allocation(|allocation| allocation.set_category_budget(category, amount));

        match &result {
            Ok(()) => info!(category, %amount, "category budget updated"),
            Err(e) => warn!(category, %amount, error = %e, "category budget rejected"),
        }
        result
    }

    /// Parse user input and set the monthly budget
    pub fn set_monthly_budget_input(&self, input: &str) -> BudgetPalResult<()> {
        self.set_monthly_budget(parse_amount(input)?)
    }

    /// Parse user input and set a category budget
    pub fn set_category_budget_input(&self, category: &str, input: &str) -> BudgetPalResult<()> {
        self.set_category_budget(category, parse_amount(input)?)
    }

    /// The "Monthly / Allocated / Remaining" figures
    pub fn summary(&self) -> BudgetPalResult<AllocationSummary> {
        let allocation = self.store.allocation()?;
        Ok(AllocationSummary {
            monthly_budget: allocation.monthly_budget,
            total_allocated: allocation.total_allocated(),
            unallocated: allocation.unallocated(),
        })
    }
}

/// Parse an amount typed by a user into a validation error on failure
pub fn parse_amount(input: &str) -> Result<Money, ValidationError> {
    Money::parse(input).map_err(|_| ValidationError::InvalidAmount(input.trim().to_string()))
}
