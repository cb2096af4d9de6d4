//! Budget display formatting
//!
//! Category budget tables, the allocation banner and the dashboard overview.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::CategoryBudget;
use crate::services::{AllocationSummary, BudgetAlert, DashboardSummary};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

/// Format category budgets with spending as a table
pub fn format_category_budgets(rows: &[CategoryBudget]) -> String {
    if rows.is_empty() {
        return "No expense categories configured.".to_string();
    }

    let table_rows = rows.iter().map(|row| CategoryRow {
        category: row.category.clone(),
        budget: row.budget_amount.to_string(),
        spent: row.spent_amount.to_string(),
        remaining: row.remaining_amount().to_string(),
        progress: format!(
            "{}%{}",
            row.progress(),
            if row.is_overspent() { " !" } else { "" }
        ),
    });

    Table::new(table_rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

/// The "Monthly / Allocated / Remaining" banner
pub fn format_allocation(summary: &AllocationSummary, currency: &str) -> String {
    format!(
        "Monthly budget: {}\nAllocated:      {}\nRemaining:      {}\n",
        summary.monthly_budget.format_with_code(currency),
        summary.total_allocated.format_with_code(currency),
        summary.unallocated.format_with_code(currency),
    )
}

/// Format the dashboard overview
pub fn format_dashboard(summary: &DashboardSummary) -> String {
    let code = summary.currency.as_str();
    let mut output = String::new();

    output.push_str(&format!("BudgetPal Summary: {}\n", summary.month.friendly()));
    output.push_str(&format!("{}\n", "=".repeat(48)));
    output.push_str(&format!(
        "Total income:   {:>20}\n",
        summary.total_income.format_with_code(code)
    ));
    output.push_str(&format!(
        "Total expenses: {:>20}\n",
        summary.total_expense.format_with_code(code)
    ));
    output.push_str(&format!(
        "Balance:        {:>20}\n",
        summary.balance.format_with_code(code)
    ));
    output.push('\n');

    output.push_str(&format!(
        "This month: spent {} of {} ({}%)\n",
        summary.month_spending,
        summary.allocation.monthly_budget,
        summary.progress
    ));
    output.push_str(&format!("Status: {}\n", summary.alert));

    if let Some((title, message)) = summary.notification {
        output.push_str(&format!("{}: {}\n", title, message));
    }

    let spent: Vec<&CategoryBudget> = summary
        .categories
        .iter()
        .filter(|c| !c.spent_amount.is_zero() || !c.budget_amount.is_zero())
        .collect();
    if !spent.is_empty() {
        output.push('\n');
        let rows: Vec<CategoryBudget> = spent.into_iter().cloned().collect();
        output.push_str(&format_category_budgets(&rows));
        output.push('\n');
    }

    output
}

/// One-word marker for scripts and terse output
pub fn alert_marker(alert: BudgetAlert) -> &'static str {
    match alert {
        BudgetAlert::None => "ok",
        BudgetAlert::Approaching => "warn",
        BudgetAlert::Exceeded => "over",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_category_table() {
        let rows = vec![
            CategoryBudget::new("Food", Money::from_units(40), Money::from_units(50)),
            CategoryBudget::new("Gifts", Money::zero(), Money::zero()),
        ];

        let table = format_category_budgets(&rows);
        assert!(table.contains("Remaining"));
        assert!(table.contains("-10.00"));
        assert!(table.contains("125% !"));
        assert!(table.contains("Gifts"));
    }

    #[test]
    fn test_allocation_banner() {
        let summary = AllocationSummary {
            monthly_budget: Money::from_units(1000),
            total_allocated: Money::from_units(750),
            unallocated: Money::from_units(250),
        };

        let banner = format_allocation(&summary, "USD");
        assert!(banner.contains("Monthly budget: USD 1000.00"));
        assert!(banner.contains("Remaining:      USD 250.00"));
    }

    #[test]
    fn test_alert_marker() {
        assert_eq!(alert_marker(BudgetAlert::Exceeded), "over");
        assert_eq!(alert_marker(BudgetAlert::None), "ok");
    }
}
