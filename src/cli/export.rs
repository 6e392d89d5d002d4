//! CLI commands for data export
//!
//! Writes to the given file, or to stdout when no output path is given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use super::plan::default_plan;
use super::CliContext;
use crate::error::{PilotError, PilotResult};
use crate::export::{csv, json, yaml, ScenarioExport};
use crate::services::ForecastService;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (history and curve)
    Csv,
    /// JSON format
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Options shared by every export
#[derive(Args, Debug)]
pub struct ExportTarget {
    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the synthetic transaction history
    History {
        #[command(flatten)]
        target: ExportTarget,

        /// Months of history to generate
        #[arg(short, long)]
        months: Option<u32>,

        /// Seed for the generator
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Export the average cumulative spend curve
    Curve {
        #[command(flatten)]
        target: ExportTarget,

        /// Months of history behind the curve
        #[arg(short, long)]
        months: Option<u32>,

        /// Seed for the generator
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Export the scenario with its forecast and default plan
    Scenario {
        #[command(flatten)]
        target: ExportTarget,

        /// Day of the month to forecast for; without one (and none recorded)
        /// only the ledger is exported
        #[arg(short, long)]
        day: Option<u32>,
    },
}

/// Handle export commands
pub fn handle_export_command(ctx: &CliContext, cmd: ExportCommands) -> PilotResult<()> {
    match cmd {
        ExportCommands::History {
            target,
            months,
            seed,
        } => handle_export_history(ctx, target, months, seed),
        ExportCommands::Curve {
            target,
            months,
            seed,
        } => handle_export_curve(ctx, target, months, seed),
        ExportCommands::Scenario { target, day } => handle_export_scenario(ctx, target, day),
    }
}

fn open_output(output: &Option<PathBuf>) -> PilotResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                PilotError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn finish(mut writer: Box<dyn Write>, output: &Option<PathBuf>, what: &str) -> PilotResult<()> {
    writer.flush()?;
    if let Some(path) = output {
        // Keep stdout clean when it carries the data itself
        println!("{} exported to: {}", what, path.display());
    }
    Ok(())
}

fn handle_export_history(
    ctx: &CliContext,
    target: ExportTarget,
    months: Option<u32>,
    seed: Option<u64>,
) -> PilotResult<()> {
    let scenario = ctx.load_scenario()?;
    let history = ctx.history(&scenario.ledger, months, seed)?;
    let mut writer = open_output(&target.output)?;

    match target.format.unwrap_or(ExportFormat::Csv) {
        ExportFormat::Csv => csv::export_history_csv(&history, &mut writer)?,
        ExportFormat::Json => serde_json::to_writer_pretty(&mut writer, &history)?,
        ExportFormat::Yaml => serde_yaml::to_writer(&mut writer, &history)?,
    }

    finish(
        writer,
        &target.output,
        &format!("{} synthetic transactions", history.len()),
    )
}

fn handle_export_curve(
    ctx: &CliContext,
    target: ExportTarget,
    months: Option<u32>,
    seed: Option<u64>,
) -> PilotResult<()> {
    let scenario = ctx.load_scenario()?;
    let curve = ctx.curve(&scenario.ledger, months, seed)?;
    let mut writer = open_output(&target.output)?;

    match target.format.unwrap_or(ExportFormat::Csv) {
        ExportFormat::Csv => csv::export_curve_csv(&curve, &mut writer)?,
        ExportFormat::Json => serde_json::to_writer_pretty(&mut writer, &curve.points())?,
        ExportFormat::Yaml => serde_yaml::to_writer(&mut writer, &curve.points())?,
    }

    finish(
        writer,
        &target.output,
        &format!("{} curve points", curve.len()),
    )
}

fn handle_export_scenario(
    ctx: &CliContext,
    target: ExportTarget,
    day: Option<u32>,
) -> PilotResult<()> {
    let format = target.format.unwrap_or(ExportFormat::Json);
    if format == ExportFormat::Csv {
        return Err(PilotError::Export(
            "Scenario export supports json or yaml".into(),
        ));
    }

    let scenario = ctx.load_scenario()?;
    let ledger = scenario.ledger;

    let (forecast, plan) = match day.or(scenario.as_of_day) {
        Some(day) => {
            let curve = ctx.curve(&ledger, None, None)?;
            let forecast = ForecastService::forecast(&ledger, day, &curve)?;
            let plan = default_plan(ctx, &ledger, &forecast)?;
            (Some(forecast), plan)
        }
        None => (None, None),
    };

    let export = ScenarioExport::new(ledger, forecast, plan);
    let mut writer = open_output(&target.output)?;

    match format {
        ExportFormat::Yaml => yaml::export_scenario_yaml(&export, &mut writer)?,
        _ => json::export_scenario_json(&export, &mut writer, true)?,
    }

    finish(writer, &target.output, "Scenario")
}
