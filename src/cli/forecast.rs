//! CLI command for the end-of-month forecast

use clap::Args;

use super::CliContext;
use crate::error::PilotResult;
use crate::reports::ForecastReport;

/// Arguments of `forecast`
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Day of the month (1-30); defaults to the day recorded in the scenario
    #[arg(short, long)]
    pub day: Option<u32>,

    /// Months of synthetic history behind the spend curve
    #[arg(short, long)]
    pub months: Option<u32>,

    /// Seed for the synthetic history
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write the forecast as CSV instead of a table
    #[arg(long)]
    pub csv: bool,
}

pub fn handle_forecast_command(ctx: &CliContext, args: ForecastArgs) -> PilotResult<()> {
    let scenario = ctx.load_scenario()?;
    let day = scenario.resolve_day(args.day)?;
    let curve = ctx.curve(&scenario.ledger, args.months, args.seed)?;

    let report = ForecastReport::generate(&scenario.ledger, day, &curve)?;

    if args.csv {
        let stdout = std::io::stdout();
        report.export_csv(&mut stdout.lock())?;
    } else {
        print!("{}", report.format_terminal(ctx.currency()));
    }

    Ok(())
}
