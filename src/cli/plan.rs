//! CLI command for reallocation planning
//!
//! Works out the target and amount from the forecast (or takes them from the
//! command line), prints the plan and optionally applies it to the scenario.

use clap::{Args, ValueEnum};
use tracing::info;

use super::CliContext;
use crate::config::PlanModeKind;
use crate::display::{format_ledger_table, format_money, format_plan};
use crate::error::{PilotError, PilotResult};
use crate::models::{Ledger, LedgerForecast, PaceRisk, ReallocationMode, ReallocationPlan};
use crate::services::{pick_target, ForecastService, LedgerService, ReallocationPlanner, TargetBasis};

/// Where the collected money goes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Into the overspend buffer category
    Buffer,
    /// Straight into the overspending category
    Direct,
}

impl From<ModeArg> for PlanModeKind {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Buffer => PlanModeKind::Buffer,
            ModeArg::Direct => PlanModeKind::Direct,
        }
    }
}

/// How the direct-mode target is chosen when none is given
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum BasisArg {
    /// Largest projected overspend at month end
    #[default]
    Forecast,
    /// Largest overspend already incurred
    Overspend,
}

impl From<BasisArg> for TargetBasis {
    fn from(basis: BasisArg) -> Self {
        match basis {
            BasisArg::Forecast => TargetBasis::Forecast,
            BasisArg::Overspend => TargetBasis::Overspend,
        }
    }
}

/// Arguments of `plan`
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Day of the month (1-30); defaults to the day recorded in the scenario
    #[arg(short, long)]
    pub day: Option<u32>,

    /// Reallocation mode (defaults to the configured one)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Category to cover in direct mode
    #[arg(short, long)]
    pub target: Option<String>,

    /// Amount to cover instead of the computed one
    #[arg(short, long)]
    pub amount: Option<f64>,

    /// What picks the direct-mode target and its need
    #[arg(long, value_enum, default_value = "forecast")]
    pub basis: BasisArg,

    /// Months of synthetic history behind the spend curve
    #[arg(short, long)]
    pub months: Option<u32>,

    /// Seed for the synthetic history
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Apply the plan and save the scenario
    #[arg(long)]
    pub apply: bool,
}

/// What to plan for: the mode and the amount it has to cover
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub mode: ReallocationMode,
    pub amount_needed: f64,
}

/// Turn command-line choices and the forecast into a plan request
///
/// `None` means direct mode found no category that needs money.
#[allow(clippy::too_many_arguments)]
pub fn resolve_request(
    ledger: &Ledger,
    forecast: &LedgerForecast,
    pace: &PaceRisk,
    mode: PlanModeKind,
    buffer_name: &str,
    target: Option<&str>,
    amount: Option<f64>,
    basis: TargetBasis,
) -> PilotResult<Option<PlanRequest>> {
    match mode {
        PlanModeKind::Buffer => Ok(Some(PlanRequest {
            mode: ReallocationMode::Buffer(buffer_name.to_string()),
            amount_needed: amount.unwrap_or_else(|| pace.over_by.max(0.0)),
        })),
        PlanModeKind::Direct => {
            let (category, computed) = match target {
                Some(name) => {
                    let category = ledger
                        .get(name)
                        .ok_or_else(|| PilotError::category_not_found(name))?;
                    let need = match basis {
                        TargetBasis::Forecast => forecast
                            .get(name)
                            .map(|r| r.gap_vs_budget.max(0.0))
                            .unwrap_or(0.0),
                        TargetBasis::Overspend => category.overspend_now(),
                    };
                    (category.name.clone(), need)
                }
                None => match pick_target(ledger, forecast, basis) {
                    Some(need) => (need.category, need.amount_needed),
                    None => return Ok(None),
                },
            };

            Ok(Some(PlanRequest {
                mode: ReallocationMode::Direct(category),
                amount_needed: amount.unwrap_or(computed),
            }))
        }
    }
}

/// Compute the plan for a ledger with configured defaults
pub fn default_plan(
    ctx: &CliContext,
    ledger: &Ledger,
    forecast: &LedgerForecast,
) -> PilotResult<Option<ReallocationPlan>> {
    let pace = ForecastService::project_total(ledger, forecast.day)?;
    let request = resolve_request(
        ledger,
        forecast,
        &pace,
        ctx.settings.reallocation.default_mode,
        &ctx.settings.reallocation.buffer_name,
        None,
        None,
        TargetBasis::Forecast,
    )?;

    request
        .map(|r| {
            ReallocationPlanner::from_settings(&ctx.settings.reallocation).plan(
                ledger,
                &r.mode,
                r.amount_needed,
            )
        })
        .transpose()
}

pub fn handle_plan_command(ctx: &CliContext, args: PlanArgs) -> PilotResult<()> {
    let mut scenario = ctx.load_scenario()?;
    let day = scenario.resolve_day(args.day)?;
    let ledger = &scenario.ledger;

    let curve = ctx.curve(ledger, args.months, args.seed)?;
    let forecast = ForecastService::forecast(ledger, day, &curve)?;
    let pace = ForecastService::project_total(ledger, day)?;

    let mode = args
        .mode
        .map(PlanModeKind::from)
        .unwrap_or(ctx.settings.reallocation.default_mode);

    let request = resolve_request(
        ledger,
        &forecast,
        &pace,
        mode,
        &ctx.settings.reallocation.buffer_name,
        args.target.as_deref(),
        args.amount,
        args.basis.into(),
    )?;

    let Some(request) = request else {
        println!("No category is projected to overspend; nothing to reallocate.");
        return Ok(());
    };

    let planner = ReallocationPlanner::from_settings(&ctx.settings.reallocation);
    let plan = planner.plan(ledger, &request.mode, request.amount_needed)?;

    print!("{}", format_plan(&plan, ledger, ctx.currency()));

    if args.apply {
        if plan.is_empty() {
            println!("\nNothing to apply.");
            return Ok(());
        }

        let updated = LedgerService::apply_transfers(ledger, &plan.transfers, &plan.mode)?;
        scenario.ledger = updated;
        scenario.as_of_day = Some(day);
        ctx.scenarios.save(&scenario)?;

        info!(transfers = plan.transfers.len(), "applied reallocation plan");
        println!(
            "\nApplied {} transfer(s), {} moved.\n",
            plan.transfers.len(),
            format_money(plan.total_moved(), ctx.currency())
        );
        println!("{}", format_ledger_table(&scenario.ledger, ctx.currency()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::models::{CategorySpec, SpendCurve};

    fn ledger() -> Ledger {
        let ledger = LedgerService::build_ledger(&CategorySpec::defaults(), 1600.0).unwrap();
        let mut spend = BTreeMap::new();
        spend.insert("Groceries".to_string(), 400.0);
        LedgerService::record_spending(&ledger, &spend).unwrap()
    }

    fn request(
        ledger: &Ledger,
        mode: PlanModeKind,
        target: Option<&str>,
        amount: Option<f64>,
        basis: TargetBasis,
    ) -> PilotResult<Option<PlanRequest>> {
        let forecast = ForecastService::forecast(ledger, 20, &SpendCurve::new()).unwrap();
        let pace = ForecastService::project_total(ledger, 20).unwrap();
        resolve_request(
            ledger,
            &forecast,
            &pace,
            mode,
            "Overspend buffer",
            target,
            amount,
            basis,
        )
    }

    #[test]
    fn test_direct_picks_worst_forecast() {
        let req = request(&ledger(), PlanModeKind::Direct, None, None, TargetBasis::Forecast)
            .unwrap()
            .unwrap();
        assert_eq!(req.mode, ReallocationMode::Direct("Groceries".into()));
        assert_eq!(req.amount_needed, 250.0);
    }

    #[test]
    fn test_direct_explicit_target_and_amount() {
        let req = request(
            &ledger(),
            PlanModeKind::Direct,
            Some("Groceries"),
            Some(50.0),
            TargetBasis::Overspend,
        )
        .unwrap()
        .unwrap();
        assert_eq!(req.amount_needed, 50.0);

        let req = request(
            &ledger(),
            PlanModeKind::Direct,
            Some("Groceries"),
            None,
            TargetBasis::Overspend,
        )
        .unwrap()
        .unwrap();
        assert_eq!(req.amount_needed, 50.0);

        let err = request(&ledger(), PlanModeKind::Direct, Some("Rent"), None, TargetBasis::Forecast)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_buffer_uses_pace_overrun() {
        // 400 * 30 / 20 = 600, well under the 1600 cap
        let req = request(&ledger(), PlanModeKind::Buffer, None, None, TargetBasis::Forecast)
            .unwrap()
            .unwrap();
        assert_eq!(req.mode, ReallocationMode::Buffer("Overspend buffer".into()));
        assert_eq!(req.amount_needed, 0.0);

        let req = request(&ledger(), PlanModeKind::Buffer, None, Some(75.0), TargetBasis::Forecast)
            .unwrap()
            .unwrap();
        assert_eq!(req.amount_needed, 75.0);
    }

    #[test]
    fn test_nothing_to_do() {
        let calm = LedgerService::build_ledger(&CategorySpec::defaults(), 1600.0).unwrap();
        assert!(request(&calm, PlanModeKind::Direct, None, None, TargetBasis::Forecast)
            .unwrap()
            .is_none());
    }
}
