//! CLI commands for the ledger
//!
//! Showing categories, recording spend so far and simulating it.

use std::collections::BTreeMap;

use clap::Args;

use super::CliContext;
use crate::display::{format_category_details, format_ledger_table};
use crate::error::PilotResult;
use crate::reports::AllocationReport;
use crate::services::{check_day, LedgerService, SpendingSimulator};

/// Arguments of `simulate`
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Day of the month to simulate up to (1-30)
    #[arg(short, long)]
    pub day: u32,

    /// Seed for the simulated spend (defaults to the history seed)
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Show the ledger table and allocation check
pub fn handle_ledger_command(ctx: &CliContext) -> PilotResult<()> {
    let scenario = ctx.load_scenario()?;

    if let Some(day) = scenario.as_of_day {
        println!("Spending as of day {}", day);
    }
    println!("{}", format_ledger_table(&scenario.ledger, ctx.currency()));
    println!();
    print!(
        "{}",
        AllocationReport::generate(&scenario.ledger).format_terminal(ctx.currency())
    );

    Ok(())
}

/// Set the spent-so-far figure of one category
pub fn handle_spend_command(
    ctx: &CliContext,
    category: &str,
    amount: f64,
    day: Option<u32>,
) -> PilotResult<()> {
    if let Some(day) = day {
        check_day(day)?;
    }
    let mut scenario = ctx.load_scenario()?;

    let mut spend = BTreeMap::new();
    spend.insert(category.trim().to_string(), amount);
    scenario.ledger = LedgerService::record_spending(&scenario.ledger, &spend)?;
    if day.is_some() {
        scenario.as_of_day = day;
    }

    ctx.scenarios.save(&scenario)?;

    if let Some(updated) = scenario.ledger.get(category.trim()) {
        print!("{}", format_category_details(updated, ctx.currency()));
    }

    Ok(())
}

/// Replace all spend figures with simulated ones
pub fn handle_simulate_command(ctx: &CliContext, args: SimulateArgs) -> PilotResult<()> {
    let mut scenario = ctx.load_scenario()?;
    let seed = args.seed.unwrap_or(ctx.settings.history.seed);

    scenario.ledger = SpendingSimulator::simulate(
        &scenario.ledger,
        args.day,
        seed,
        &ctx.settings.simulation,
    )?;
    scenario.as_of_day = Some(args.day);
    ctx.scenarios.save(&scenario)?;

    println!("Simulated spending up to day {} (seed {})", args.day, seed);
    println!("{}", format_ledger_table(&scenario.ledger, ctx.currency()));

    Ok(())
}
