//! JSON Export functionality
//!
//! Exports a full scenario snapshot (ledger, forecast and reallocation plan)
//! with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PilotError, PilotResult};
use crate::models::{AllocationStatus, Ledger, LedgerForecast, ReallocationPlan};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Scenario snapshot structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub ledger: Ledger,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<LedgerForecast>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<ReallocationPlan>,

    pub metadata: ExportMetadata,
}

/// Summary figures for readers that skip the detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub category_count: usize,
    pub total_budget: f64,
    pub total_planned: f64,
    pub total_spent: f64,
    /// total_budget - total_planned
    pub allocation_gap: f64,
    pub overspent_categories: Vec<String>,
}

impl ScenarioExport {
    pub fn new(
        ledger: Ledger,
        forecast: Option<LedgerForecast>,
        plan: Option<ReallocationPlan>,
    ) -> Self {
        let metadata = ExportMetadata {
            category_count: ledger.len(),
            total_budget: ledger.total_budget,
            total_planned: ledger.total_planned(),
            total_spent: ledger.total_spent(),
            allocation_gap: ledger.allocation_gap(),
            overspent_categories: ledger
                .categories
                .iter()
                .filter(|c| c.is_overspent())
                .map(|c| c.name.clone())
                .collect(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            ledger,
            forecast,
            plan,
            metadata,
        }
    }

    pub fn allocation_status(&self) -> AllocationStatus {
        self.ledger.allocation_status()
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if let Some(forecast) = &self.forecast {
            for result in &forecast.results {
                if !self.ledger.contains(&result.category) {
                    return Err(format!(
                        "Forecast references unknown category {}",
                        result.category
                    ));
                }
            }
        }

        if let Some(plan) = &self.plan {
            for transfer in &plan.transfers {
                if !self.ledger.contains(&transfer.from_category) {
                    return Err(format!(
                        "Transfer references unknown category {}",
                        transfer.from_category
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Export a scenario snapshot to JSON
pub fn export_scenario_json<W: Write>(
    export: &ScenarioExport,
    writer: &mut W,
    pretty: bool,
) -> PilotResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| PilotError::Export(e.to_string()))?;

    Ok(())
}

/// Read a JSON snapshot back (for verification)
pub fn import_from_json(json_str: &str) -> PilotResult<ScenarioExport> {
    let export: ScenarioExport =
        serde_json::from_str(json_str).map_err(|e| PilotError::Export(e.to_string()))?;

    export.validate().map_err(PilotError::Export)?;

    Ok(export)
}
