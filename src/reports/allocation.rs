//! Allocation Report
//!
//! Compares the sum of category budgets with the ledger's overall cap and
//! summarises spending against both.

use std::io::Write;

use crate::display::{format_money, format_percentage};
use crate::error::{PilotError, PilotResult};
use crate::models::{AllocationStatus, Ledger};

/// Allocation check for a ledger
#[derive(Debug, Clone)]
pub struct AllocationReport {
    pub total_budget: f64,
    pub total_planned: f64,
    pub total_spent: f64,
    pub status: AllocationStatus,
    /// Share of the cap assigned to categories, 0..=1
    pub allocated_fraction: Option<f64>,
    pub overspent: Vec<(String, f64)>,
}

impl AllocationReport {
    pub fn generate(ledger: &Ledger) -> Self {
        Self {
            total_budget: ledger.total_budget,
            total_planned: ledger.total_planned(),
            total_spent: ledger.total_spent(),
            status: ledger.allocation_status(),
            allocated_fraction: ledger.allocated_fraction(),
            overspent: ledger
                .categories
                .iter()
                .filter(|c| c.is_overspent())
                .map(|c| (c.name.clone(), c.overspend_now()))
                .collect(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Allocation Check\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>16}\n",
            "Total budget:",
            format_money(self.total_budget, symbol)
        ));
        output.push_str(&format!(
            "{:<22} {:>16}\n",
            "Assigned to categories:",
            format_money(self.total_planned, symbol)
        ));
        output.push_str(&format!(
            "{:<22} {:>16}\n",
            "Spent so far:",
            format_money(self.total_spent, symbol)
        ));

        if let Some(fraction) = self.allocated_fraction {
            output.push_str(&format!(
                "{:<22} {:>16}\n",
                "Allocated:",
                format_percentage(fraction * 100.0)
            ));
        }

        match self.status {
            AllocationStatus::Unallocated(gap) => output.push_str(&format!(
                "\n{} not yet assigned to any category\n",
                format_money(gap, symbol)
            )),
            AllocationStatus::Overallocated(gap) => output.push_str(&format!(
                "\nCategory budgets exceed the total by {}\n",
                format_money(gap, symbol)
            )),
            AllocationStatus::Balanced => output.push_str("\nFully allocated\n"),
        }

        for (name, over) in &self.overspent {
            output.push_str(&format!(
                "* {} is over budget by {}\n",
                name,
                format_money(*over, symbol)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> PilotResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let gap = self.total_budget - self.total_planned;

        csv_writer
            .write_record(["total_budget", "total_planned", "total_spent", "allocation_gap"])
            .map_err(|e| PilotError::Export(e.to_string()))?;
        csv_writer
            .write_record([
                format!("{:.2}", self.total_budget),
                format!("{:.2}", self.total_planned),
                format!("{:.2}", self.total_spent),
                format!("{:.2}", gap),
            ])
            .map_err(|e| PilotError::Export(e.to_string()))?;

        csv_writer
            .flush()
            .map_err(|e| PilotError::Export(e.to_string()))
    }
}
