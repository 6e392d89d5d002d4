//! CSV Export functionality
//!
//! Exports the synthetic history and the spend curve in a
//! spreadsheet-compatible layout, one record per row with a header line.

use std::io::Write;

use crate::error::{PilotError, PilotResult};
use crate::models::{SpendCurve, TransactionSet};

fn export_err(e: csv::Error) -> PilotError {
    PilotError::Export(e.to_string())
}

/// Export every synthetic transaction
///
/// Columns: `month_index,day_of_month,category,amount`.
pub fn export_history_csv<W: Write>(history: &TransactionSet, writer: W) -> PilotResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["month_index", "day_of_month", "category", "amount"])
        .map_err(export_err)?;

    for tx in &history.transactions {
        csv_writer
            .write_record([
                tx.month_index.to_string(),
                tx.day_of_month.to_string(),
                tx.category.clone(),
                format!("{:.2}", tx.amount),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| PilotError::Export(e.to_string()))
}

/// Export the curve, ordered by category then day
pub fn export_curve_csv<W: Write>(curve: &SpendCurve, writer: W) -> PilotResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Header comes from the CurvePoint field names
    for point in curve.points() {
        csv_writer.serialize(&point).map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| PilotError::Export(e.to_string()))
}
