//! Monthly budget and its category allocations
//!
//! [`BudgetAllocation`] is the unit the allocation rules act on: the monthly
//! budget together with every category budget. Its setters either apply a
//! change that keeps `monthly_budget >= total_allocated()` or return a
//! [`ValidationError`] and leave `self` untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;
use crate::error::ValidationError;

/// The monthly budget and the category budgets carved out of it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    #[serde(default)]
    pub monthly_budget: Money,

    #[serde(default)]
    pub category_budgets: BTreeMap<String, Money>,
}

impl BudgetAllocation {
    pub fn new(monthly_budget: Money) -> Self {
        Self {
            monthly_budget,
            category_budgets: BTreeMap::new(),
        }
    }

    /// Budget for one category, zero when unset
    pub fn budget_for(&self, category: &str) -> Money {
        self.category_budgets
            .get(category)
            .copied()
            .unwrap_or_default()
    }

    /// Sum of all category budgets, saturating at the `i64` bounds
    pub fn total_allocated(&self) -> Money {
        self.category_budgets.values().sum()
    }

    /// Sum of all category budgets, or an error if it does not fit
    fn checked_total(&self) -> Result<Money, ValidationError> {
        self.category_budgets
            .values()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(*m))
            .ok_or(ValidationError::AllocationOverflow)
    }

    /// Monthly budget not yet given to a category
    pub fn unallocated(&self) -> Money {
        self.monthly_budget - self.total_allocated()
    }

    /// Change the monthly budget
    pub fn set_monthly_budget(&mut self, amount: Money) -> Result<(), ValidationError> {
        if amount.is_negative() {
            return Err(ValidationError::NegativeAmount(amount));
        }

        let allocated = self.checked_total()?;
        if amount < allocated {
            return Err(ValidationError::BudgetBelowAllocated {
                requested: amount,
                allocated,
            });
        }

        self.monthly_budget = amount;
        Ok(())
    }

    /// Change one category's budget
    pub fn set_category_budget(
        &mut self,
        category: &str,
        amount: Money,
    ) -> Result<(), ValidationError> {
        if amount.is_negative() {
            return Err(ValidationError::NegativeAmount(amount));
        }

        let total = self
            .checked_total()?
            .checked_sub(self.budget_for(category))
            .and_then(|others| others.checked_add(amount))
            .ok_or(ValidationError::AllocationOverflow)?;
        if total > self.monthly_budget {
            return Err(ValidationError::AllocationExceedsMonthly {
                category: category.to_string(),
                requested: amount,
                total,
                monthly: self.monthly_budget,
            });
        }

        self.category_budgets.insert(category.to_string(), amount);
        Ok(())
    }

    /// Check the whole allocation, e.g. one assembled from a backup
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.monthly_budget.is_negative() {
            return Err(ValidationError::NegativeAmount(self.monthly_budget));
        }
        if let Some(negative) = self.category_budgets.values().find(|m| m.is_negative()) {
            return Err(ValidationError::NegativeAmount(*negative));
        }

        let allocated = self.checked_total()?;
        if allocated > self.monthly_budget {
            return Err(ValidationError::BudgetBelowAllocated {
                requested: self.monthly_budget,
                allocated,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    #[test]
    fn test_category_within_monthly_succeeds() {
        let mut alloc = BudgetAllocation::new(units(1000));
        alloc.set_category_budget("Food", units(300)).unwrap();
        assert_eq!(alloc.budget_for("Food"), units(300));
        assert_eq!(alloc.unallocated(), units(700));
    }

    #[test]
    fn test_allocation_exceeding_monthly_is_rejected() {
        let mut alloc = BudgetAllocation::new(units(1000));
        alloc.set_category_budget("Food", units(300)).unwrap();

        let before = alloc.clone();
        let err = alloc
            .set_category_budget("Transportation", units(800))
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::AllocationExceedsMonthly {
                category: "Transportation".into(),
                requested: units(800),
                total: units(1100),
                monthly: units(1000),
            }
        );
        assert_eq!(alloc, before);
        assert_eq!(alloc.budget_for("Transportation"), Money::zero());
    }

    #[test]
    fn test_replacing_a_category_excludes_its_old_amount() {
        let mut alloc = BudgetAllocation::new(units(1000));
        alloc.set_category_budget("Food", units(900)).unwrap();
        // 900 is replaced, not added to
        alloc.set_category_budget("Food", units(1000)).unwrap();
        assert_eq!(alloc.total_allocated(), units(1000));
    }

    #[test]
    fn test_exact_fill_is_allowed() {
        let mut alloc = BudgetAllocation::new(units(500));
        alloc.set_category_budget("Food", units(200)).unwrap();
        alloc.set_category_budget("Housing", units(300)).unwrap();
        assert_eq!(alloc.unallocated(), Money::zero());
    }

    #[test]
    fn test_monthly_below_allocated_is_rejected() {
        let mut alloc = BudgetAllocation::new(units(1000));
        alloc.set_category_budget("Food", units(400)).unwrap();
        alloc.set_category_budget("Housing", units(300)).unwrap();

        let err = alloc.set_monthly_budget(units(500)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BudgetBelowAllocated {
                requested: units(500),
                allocated: units(700),
            }
        );
        assert_eq!(alloc.monthly_budget, units(1000));

        alloc.set_monthly_budget(units(700)).unwrap();
        assert_eq!(alloc.monthly_budget, units(700));
    }

    #[test]
    fn test_negative_amounts_are_rejected() {
        let mut alloc = BudgetAllocation::new(units(1000));
        assert_eq!(
            alloc.set_category_budget("Food", units(-1)),
            Err(ValidationError::NegativeAmount(units(-1)))
        );
        assert_eq!(
            alloc.set_monthly_budget(units(-5)),
            Err(ValidationError::NegativeAmount(units(-5)))
        );
    }

    #[test]
    fn test_huge_budgets_cannot_wrap_the_total() {
        let mut alloc = BudgetAllocation::new(Money::from_cents(9_000_000_000_000_000_000));
        alloc
            .set_category_budget("Food", Money::from_cents(5_000_000_000_000_000_000))
            .unwrap();

        let before = alloc.clone();
        assert_eq!(
            alloc.set_category_budget("Transportation", Money::from_cents(5_000_000_000_000_000_000)),
            Err(ValidationError::AllocationOverflow)
        );
        assert_eq!(alloc, before);
        assert!(alloc.total_allocated() <= alloc.monthly_budget);
    }

    #[test]
    fn test_validate_rejects_overflowing_total() {
        let mut alloc = BudgetAllocation::new(Money::from_cents(i64::MAX));
        alloc.category_budgets.insert("Food".into(), Money::from_cents(i64::MAX));
        alloc.category_budgets.insert("Housing".into(), Money::from_cents(i64::MAX));

        assert_eq!(alloc.validate(), Err(ValidationError::AllocationOverflow));
        assert_eq!(
            alloc.set_monthly_budget(Money::from_cents(i64::MAX)),
            Err(ValidationError::AllocationOverflow)
        );
    }

    #[test]
    fn test_validate_whole_allocation() {
        let mut alloc = BudgetAllocation::new(units(100));
        alloc.category_budgets.insert("Food".into(), units(150));
        assert!(matches!(
            alloc.validate(),
            Err(ValidationError::BudgetBelowAllocated { .. })
        ));

        alloc.category_budgets.insert("Food".into(), units(-1));
        assert_eq!(alloc.validate(), Err(ValidationError::NegativeAmount(units(-1))));

        alloc.category_budgets.insert("Food".into(), units(100));
        assert!(alloc.validate().is_ok());
    }
}
