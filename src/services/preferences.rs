//! Currency, onboarding and notification preferences

use tracing::{info, warn};

use crate::error::{BudgetPalError, BudgetPalResult};
use crate::models::normalize_currency;
use crate::storage::BudgetStore;

/// Service for the settings screen toggles
pub struct PreferenceService<'a, S: BudgetStore> {
    store: &'a S,
}

impl<'a, S: BudgetStore> PreferenceService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Select a display currency; only supported codes are accepted
    pub fn set_currency(&self, code: &str) -> BudgetPalResult<&'static str> {
        let Some(normalized) = normalize_currency(code) else {
            warn!(code, "unsupported currency");
            return Err(BudgetPalError::Config(format!(
                "Unsupported currency '{}'",
                code.trim()
            )));
        };

        self.store.set_selected_currency(normalized)?;
        info!(currency = normalized, "currency selected");
        Ok(normalized)
    }

    pub fn currency(&self) -> BudgetPalResult<String> {
        self.store.selected_currency()
    }

    pub fn set_notifications(&self, enabled: bool) -> BudgetPalResult<()> {
        self.store.set_notifications_enabled(enabled)?;
        info!(enabled, "notifications toggled");
        Ok(())
    }

    pub fn notifications_enabled(&self) -> BudgetPalResult<bool> {
        self.store.notifications_enabled()
    }

    pub fn complete_onboarding(&self) -> BudgetPalResult<()> {
        self.store.set_onboarding_completed(true)
    }

    pub fn is_onboarding_completed(&self) -> BudgetPalResult<bool> {
        self.store.is_onboarding_completed()
    }
}
