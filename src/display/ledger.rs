//! Ledger display formatting
//!
//! Formats the category list of a ledger as a terminal table.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::format_money;
use crate::models::{Category, Ledger};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Priority")]
    priority: u8,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl CategoryRow {
    fn from_category(category: &Category, symbol: &str) -> Self {
        let status = if category.is_overspent() {
            format!("over by {}", format_money(category.overspend_now(), symbol))
        } else {
            "ok".to_string()
        };

        Self {
            name: category.name.clone(),
            priority: category.priority.value(),
            budget: format_money(category.budget, symbol),
            spent: format_money(category.spent_so_far, symbol),
            remaining: format_money(category.remaining(), symbol),
            status,
        }
    }
}

/// Format every category of the ledger as a table, in ledger order
pub fn format_ledger_table(ledger: &Ledger, symbol: &str) -> String {
    if ledger.is_empty() {
        return "No categories found.\n\nRun 'budget-pilot init' to create a default scenario."
            .to_string();
    }

    let rows: Vec<CategoryRow> = ledger
        .categories
        .iter()
        .map(|c| CategoryRow::from_category(c, symbol))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..5), Alignment::right());

    table.to_string()
}

/// Format details of a single category
pub fn format_category_details(category: &Category, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  Priority:  {}\n", category.priority));
    output.push_str(&format!(
        "  Budget:    {}\n",
        format_money(category.budget, symbol)
    ));
    output.push_str(&format!(
        "  Spent:     {}\n",
        format_money(category.spent_so_far, symbol)
    ));
    output.push_str(&format!(
        "  Remaining: {}\n",
        format_money(category.remaining(), symbol)
    ));

    output
}
