//! YAML Export functionality
//!
//! Writes the same scenario snapshot as the JSON export in a
//! human-readable form.

use std::io::Write;

use crate::error::{PilotError, PilotResult};
use crate::export::json::ScenarioExport;

fn export_err(e: impl std::fmt::Display) -> PilotError {
    PilotError::Export(e.to_string())
}

/// Export a scenario snapshot to YAML
pub fn export_scenario_yaml<W: Write>(export: &ScenarioExport, writer: &mut W) -> PilotResult<()> {
    writeln!(writer, "# Budget Pilot Scenario Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, export).map_err(export_err)?;

    Ok(())
}

/// Read a YAML snapshot back
pub fn import_from_yaml(yaml_str: &str) -> PilotResult<ScenarioExport> {
    let export: ScenarioExport = serde_yaml::from_str(yaml_str).map_err(export_err)?;

    export.validate().map_err(PilotError::Export)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_export;

    #[test]
    fn test_yaml_export() {
        let export = sample_export();
        let mut buffer = Vec::new();
        export_scenario_yaml(&export, &mut buffer).unwrap();

        let yaml = String::from_utf8(buffer).unwrap();
        assert!(yaml.starts_with("# Budget Pilot Scenario Export"));
        assert!(yaml.contains("schema_version"));
        assert!(yaml.contains("Groceries"));

        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.ledger, export.ledger);
        assert_eq!(imported.forecast, export.forecast);
    }
}
