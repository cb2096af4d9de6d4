//! User settings for BudgetPal
//!
//! Application-level configuration: the category lists, the budget alert
//! threshold and display preferences. Budget figures themselves live in the
//! preference store, not here.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPalPaths;
use crate::error::BudgetPalError;
use crate::models::CategorySet;

/// User settings for BudgetPal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Expense and income category names
    #[serde(default)]
    pub categories: CategorySet,

    /// Spending percentage at which a budget counts as "approaching"
    #[serde(default = "default_alert_percent")]
    pub budget_alert_percent: u32,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_alert_percent() -> u32 {
    80
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            categories: CategorySet::default(),
            budget_alert_percent: default_alert_percent(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPalPaths) -> Result<Self, BudgetPalError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetPalError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BudgetPalError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPalPaths) -> Result<(), BudgetPalError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetPalError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetPalError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the rest of the crate cannot work with
    pub fn validate(&self) -> Result<(), BudgetPalError> {
        self.categories
            .validate()
            .map_err(|e| BudgetPalError::Config(format!("Invalid categories: {}", e)))?;

        if self.budget_alert_percent == 0 || self.budget_alert_percent >= 100 {
            return Err(BudgetPalError::Config(format!(
                "budget_alert_percent must be between 1 and 99, got {}",
                self.budget_alert_percent
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.budget_alert_percent, 80);
        assert!(settings.categories.expense.contains(&"Food".to_string()));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPalPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.budget_alert_percent = 90;
        settings.categories.expense.push("Pets".into());
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.budget_alert_percent, 90);
        assert!(loaded.categories.expense.contains(&"Pets".to_string()));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.categories, CategorySet::default());
    }

    #[test]
    fn test_load_rejects_overlapping_categories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPalPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(
            paths.settings_file(),
            r#"{"categories":{"expense":["Other"],"income":["Other"]}}"#,
        )
        .unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BudgetPalError::Config(_)));
    }
}
