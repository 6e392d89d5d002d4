//! Forecast Report
//!
//! Per-category end-of-month projections plus the whole-ledger pace check.

use std::io::Write;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::display::format_money;
use crate::error::{PilotError, PilotResult};
use crate::models::{ForecastMethod, Ledger, LedgerForecast, PaceRisk, SpendCurve};
use crate::services::ForecastService;

#[derive(Tabled)]
struct ForecastRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Forecast")]
    forecast: String,
    #[tabled(rename = "Gap")]
    gap: String,
    #[tabled(rename = "Method")]
    method: &'static str,
}

/// Forecast for one day of the month
#[derive(Debug, Clone)]
pub struct ForecastReport {
    pub forecast: LedgerForecast,
    pub pace: PaceRisk,
}

impl ForecastReport {
    pub fn generate(ledger: &Ledger, day: u32, curve: &SpendCurve) -> PilotResult<Self> {
        Ok(Self {
            forecast: ForecastService::forecast(ledger, day, curve)?,
            pace: ForecastService::project_total(ledger, day)?,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "End-of-month forecast, day {}\n\n",
            self.forecast.day
        ));

        let rows: Vec<ForecastRow> = self
            .forecast
            .results
            .iter()
            .map(|r| {
                let gap = format_money(r.gap_vs_budget, symbol);
                ForecastRow {
                    category: r.category.clone(),
                    budget: format_money(r.budget, symbol),
                    spent: format_money(r.spent_so_far, symbol),
                    forecast: format_money(r.forecast_total, symbol),
                    gap: if r.is_projected_overspend() {
                        format!("{} *", gap)
                    } else {
                        gap
                    },
                    method: match r.method {
                        ForecastMethod::Curve => "curve",
                        ForecastMethod::Pace => "pace",
                    },
                }
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .modify(Columns::new(1..5), Alignment::right());
        output.push_str(&table.to_string());
        output.push_str("\n* = projected overspend\n\n");

        output.push_str(&format!(
            "At the current pace total spending reaches {} of {}",
            format_money(self.pace.projected_total, symbol),
            format_money(self.pace.total_budget, symbol)
        ));
        if self.pace.is_at_risk() {
            output.push_str(&format!(
                " (over by {})\n",
                format_money(self.pace.over_by, symbol)
            ));
        } else {
            output.push('\n');
        }

        output
    }

    /// Export the per-category rows to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> PilotResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record([
                "day",
                "category",
                "budget",
                "spent_so_far",
                "forecast_total",
                "gap_vs_budget",
                "method",
            ])
            .map_err(|e| PilotError::Export(e.to_string()))?;

        for r in &self.forecast.results {
            csv_writer
                .write_record([
                    self.forecast.day.to_string(),
                    r.category.clone(),
                    format!("{:.2}", r.budget),
                    format!("{:.2}", r.spent_so_far),
                    format!("{:.2}", r.forecast_total),
                    format!("{:.2}", r.gap_vs_budget),
                    format!("{:?}", r.method).to_lowercase(),
                ])
                .map_err(|e| PilotError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| PilotError::Export(e.to_string()))
    }
}
