//! Display formatting for terminal output
//!
//! Table rendering (via `tabled`) for ledgers and reallocation plans, plus
//! small formatting helpers shared with the reports.

pub mod ledger;
pub mod plan;

pub use ledger::{format_category_details, format_ledger_table};
pub use plan::{explain_transfer, format_plan};

/// Format an amount with the currency symbol, sign in front
pub fn format_money(amount: f64, symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", symbol, -amount)
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}
