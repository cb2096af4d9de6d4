//! Core data models for BudgetPal
//!
//! Transactions, money, calendar months, categories and the monthly budget
//! allocation.

pub mod budget;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::BudgetAllocation;
pub use category::{progress_percentage, CategoryBudget, CategorySet};
pub use currency::{normalize_currency, DEFAULT_CURRENCY, SUPPORTED_CURRENCIES};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use period::{MonthPeriod, PeriodParseError};
pub use transaction::{Transaction, TransactionType};
