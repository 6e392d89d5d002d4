use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use budget_pilot::cli::{
    handle_export_command, handle_forecast_command, handle_ledger_command, handle_plan_command,
    handle_simulate_command, handle_spend_command, CliContext, ExportCommands, ForecastArgs,
    PlanArgs, SimulateArgs,
};
use budget_pilot::config::{paths::DATA_DIR_ENV, PilotPaths, Settings};
use budget_pilot::storage::{initialize_storage, ScenarioRepository};

#[derive(Parser)]
#[command(
    name = "budget-pilot",
    author = "Kaylee Beyene",
    version,
    about = "Priority-aware budget forecasting and reallocation",
    long_about = "Budget Pilot forecasts end-of-month spending per category from a \
                  seeded synthetic history and proposes budget transfers that cover \
                  overspending by trimming the lowest-priority categories first."
)]
struct Cli {
    /// Scenario file to use instead of the default one (.json, .yaml or .yml)
    #[arg(long, global = true, env = "BUDGET_PILOT_FILE")]
    file: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default settings and a starter scenario
    Init,

    /// Show current configuration and paths
    Config,

    /// Show categories and the allocation check
    #[command(alias = "ls")]
    Ledger,

    /// Record the amount spent so far in a category
    Spend {
        /// Category name
        category: String,
        /// Amount spent so far this month
        amount: f64,
        /// Day of the month the figure refers to
        #[arg(short, long)]
        day: Option<u32>,
    },

    /// Fill spend figures with simulated values
    Simulate(SimulateArgs),

    /// Forecast end-of-month spend per category
    Forecast(ForecastArgs),

    /// Propose (and optionally apply) budget transfers
    Plan(PlanArgs),

    /// Export history, curve or scenario
    #[command(subcommand)]
    Export(ExportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = PilotPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ctx = CliContext::new(paths, settings, cli.file);

    match cli.command {
        Some(Commands::Init) => {
            println!(
                "Initializing Budget Pilot at: {}",
                ctx.paths.base_dir().display()
            );
            if initialize_storage(&ctx.paths)? {
                println!("Initialization complete!");
                println!();
                println!("A starter scenario has been created:");
                println!("  - Groceries   350.00 (priority 5)");
                println!("  - Eating out  250.00 (priority 3)");
                println!("  - Leisure     200.00 (priority 2)");
                println!("  - Transport   100.00 (priority 4)");
                println!("  Total budget 1600.00");
                println!();
                println!("Run 'budget-pilot ledger' to see it.");
            } else {
                println!("Already initialized, nothing to do.");
            }

            // --file points init at a scenario of its own
            if !ctx.scenarios.exists() {
                let default = ScenarioRepository::new(ctx.paths.scenario_file()).load()?;
                ctx.scenarios.save(&default)?;
                println!("Scenario written to: {}", ctx.scenarios.path().display());
            }
        }
        Some(Commands::Config) => {
            println!("Budget Pilot Configuration");
            println!("==========================");
            println!("Base directory:   {}", ctx.paths.base_dir().display());
            println!("  (override with {})", DATA_DIR_ENV);
            println!("Settings file:    {}", ctx.paths.settings_file().display());
            println!("Scenario file:    {}", ctx.scenarios.path().display());
            println!("Export directory: {}", ctx.paths.export_dir().display());
            println!();
            println!("Settings:");
            println!(
                "  History:      {} months, seed {}, rate {}/day, sigma {}",
                ctx.settings.history.months,
                ctx.settings.history.seed,
                ctx.settings.history.poisson_rate,
                ctx.settings.history.amount_sigma
            );
            println!(
                "  Reallocation: {:?} mode, cap {:.0}% per source, buffer '{}'",
                ctx.settings.reallocation.default_mode,
                ctx.settings.reallocation.max_cut_ratio * 100.0,
                ctx.settings.reallocation.buffer_name
            );
            println!(
                "  Simulation:   pace {}, noise {}",
                ctx.settings.simulation.pace_factor, ctx.settings.simulation.noise_ratio
            );
            println!("  Currency:     {}", ctx.settings.currency_symbol);
        }
        Some(Commands::Ledger) => handle_ledger_command(&ctx)?,
        Some(Commands::Spend {
            category,
            amount,
            day,
        }) => handle_spend_command(&ctx, &category, amount, day)?,
        Some(Commands::Simulate(args)) => handle_simulate_command(&ctx, args)?,
        Some(Commands::Forecast(args)) => handle_forecast_command(&ctx, args)?,
        Some(Commands::Plan(args)) => handle_plan_command(&ctx, args)?,
        Some(Commands::Export(cmd)) => handle_export_command(&ctx, cmd)?,
        None => {
            println!("Budget Pilot - budget forecasting and reallocation");
            println!();
            println!("Run 'budget-pilot --help' for usage information.");
            println!("Run 'budget-pilot init' to create a starter scenario.");
        }
    }

    Ok(())
}
