//! BudgetPal - personal budgeting core
//!
//! This library records income and expense transactions, keeps a monthly
//! budget split into per-category budgets, derives spending and progress
//! figures, and backs the whole state up to JSON snapshots that restore
//! exactly.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Validation, codec and crate-wide error types
//! - `models`: Money, transactions, months, categories, budget allocation
//! - `storage`: JSON file storage behind the `BudgetStore` trait
//! - `services`: Aggregation, allocation rules, transactions, dashboard
//! - `backup`: Snapshot codec, backup artifacts and restore
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetpal::config::{paths::BudgetPalPaths, settings::Settings};
//! use budgetpal::services::AllocationService;
//! use budgetpal::storage::Storage;
//!
//! let paths = BudgetPalPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths, settings.categories)?;
//!
//! AllocationService::new(&storage).set_monthly_budget_input("1000")?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BudgetPalError, BudgetPalResult};
