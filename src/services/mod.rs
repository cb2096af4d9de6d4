//! Service layer for BudgetPal
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and computed figures. Services borrow a
//! [`BudgetStore`](crate::storage::BudgetStore) and hold no state of their own.

pub mod aggregator;
pub mod allocation;
pub mod dashboard;
pub mod preferences;
pub mod transaction;

pub use aggregator::BudgetAlert;
pub use allocation::{parse_amount, AllocationService, AllocationSummary};
pub use dashboard::{DashboardService, DashboardSummary};
pub use preferences::PreferenceService;
pub use transaction::{TransactionInput, TransactionService};
