//! Summary command: the dashboard overview

use crate::config::settings::Settings;
use crate::display::{alert_marker, format_dashboard};
use crate::error::BudgetPalResult;
use crate::services::DashboardService;
use crate::storage::Storage;

use super::parse_period;

/// Print the dashboard for a month
///
/// With `brief`, prints a single `<marker> <progress>%` line instead.
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    period: Option<&str>,
    brief: bool,
) -> BudgetPalResult<()> {
    let month = parse_period(period)?;
    let summary = DashboardService::new(storage, settings.budget_alert_percent).summary(month)?;

    if brief {
        println!("{} {}%", alert_marker(summary.alert), summary.progress);
    } else {
        print!("{}", format_dashboard(&summary));
    }

    Ok(())
}
