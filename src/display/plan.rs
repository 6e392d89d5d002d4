//! Reallocation plan display
//!
//! Renders a plan as a transfer table followed by one explanation line per
//! transfer. Explanations read the source figures from the ledger the plan
//! was computed against.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::format_money;
use crate::models::{Ledger, ReallocationPlan, Transfer};

#[derive(Tabled)]
struct TransferRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Priority")]
    priority: u8,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "To")]
    to: String,
}

/// One-line reason for a transfer
pub fn explain_transfer(transfer: &Transfer, ledger: &Ledger, symbol: &str) -> String {
    match ledger.get(&transfer.from_category) {
        Some(source) => format!(
            "Move {} from {} to {}: priority {}, {} of {} planned still unspent ({} spent)",
            format_money(transfer.amount_moved, symbol),
            transfer.from_category,
            transfer.to,
            source.priority,
            format_money(source.remaining(), symbol),
            format_money(source.budget, symbol),
            format_money(source.spent_so_far, symbol),
        ),
        None => format!(
            "Move {} from {} to {}",
            format_money(transfer.amount_moved, symbol),
            transfer.from_category,
            transfer.to
        ),
    }
}

/// Format a plan with its transfer table, reasons and coverage summary
pub fn format_plan(plan: &ReallocationPlan, ledger: &Ledger, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Reallocation plan, {} mode: {} needed\n",
        plan.mode,
        format_money(plan.amount_needed, symbol)
    ));

    if plan.is_empty() {
        if plan.amount_needed <= 0.0 {
            output.push_str("Nothing to reallocate.\n");
        } else {
            output.push_str("No category has budget left to give.\n");
        }
    } else {
        let rows: Vec<TransferRow> = plan
            .transfers
            .iter()
            .map(|t| TransferRow {
                from: t.from_category.clone(),
                priority: t.from_priority.value(),
                amount: format_money(t.amount_moved, symbol),
                to: t.to.to_string(),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .modify(Columns::new(1..3), Alignment::right());

        output.push('\n');
        output.push_str(&table.to_string());
        output.push_str("\n\n");

        for transfer in &plan.transfers {
            output.push_str(&format!("  {}\n", explain_transfer(transfer, ledger, symbol)));
        }
    }

    output.push_str(&format!(
        "\nTotal moved: {}\n",
        format_money(plan.total_moved(), symbol)
    ));

    if !plan.is_fully_covered() {
        output.push_str(&format!(
            "WARNING: {} could not be covered within the safety caps\n",
            format_money(plan.uncovered, symbol)
        ));
    }

    output
}
