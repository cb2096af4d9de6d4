//! Configuration module for BudgetPal
//!
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgetPalPaths;
pub use settings::Settings;
