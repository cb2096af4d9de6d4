//! Display formatting for terminal output
//!
//! Provides utilities for formatting budgets, transactions and the dashboard
//! for terminal display.

pub mod budget;
pub mod transaction;

pub use budget::{alert_marker, format_allocation, format_category_budgets, format_dashboard};
pub use transaction::{format_transaction_details, format_transaction_table};
