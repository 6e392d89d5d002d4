use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "budget-pilot";

fn pilot(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BUDGET_PILOT_DATA_DIR", dir.path());
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("BUDGET_PILOT_FILE");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    pilot(&dir).arg("init").assert().success();
    dir
}

#[test]
fn init_creates_starter_scenario_once() {
    let dir = TempDir::new().unwrap();

    pilot(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("scenario.json").exists());

    pilot(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Already initialized"));
}

#[test]
fn ledger_shows_categories_and_allocation_check() {
    let dir = initialized();

    pilot(&dir)
        .arg("ledger")
        .assert()
        .success()
        .stdout(contains("Eating out"))
        .stdout(contains("Allocation Check"))
        .stdout(contains("€700.00 not yet assigned"));
}

#[test]
fn commands_before_init_explain_what_to_do() {
    let dir = TempDir::new().unwrap();

    pilot(&dir)
        .arg("ledger")
        .assert()
        .failure()
        .stderr(contains("budget-pilot init"));
}

#[test]
fn spend_rejects_unknown_category() {
    let dir = initialized();

    pilot(&dir)
        .args(["spend", "Rent", "100"])
        .assert()
        .failure()
        .stderr(contains("Category not found: Rent"));
}

#[test]
fn forecast_needs_a_day() {
    let dir = initialized();

    pilot(&dir)
        .arg("forecast")
        .assert()
        .failure()
        .stderr(contains("--day"));

    pilot(&dir)
        .args(["forecast", "--day", "31"])
        .assert()
        .failure()
        .stderr(contains("between 1 and 30"));
}

#[test]
fn spend_rejects_day_out_of_range_without_saving() {
    let dir = initialized();

    pilot(&dir)
        .args(["spend", "Groceries", "100", "--day", "45"])
        .assert()
        .failure()
        .stderr(contains("between 1 and 30"));

    let saved =
        std::fs::read_to_string(dir.path().join("data").join("scenario.json")).unwrap();
    assert!(!saved.contains("as_of_day"));

    pilot(&dir)
        .arg("forecast")
        .assert()
        .failure()
        .stderr(contains("--day"));
}

#[test]
fn forecast_uses_the_spend_curve() {
    let dir = initialized();
    pilot(&dir)
        .args(["spend", "Groceries", "300", "--day", "15"])
        .assert()
        .success();

    pilot(&dir)
        .arg("forecast")
        .assert()
        .success()
        .stdout(contains("End-of-month forecast, day 15"))
        .stdout(contains("curve"))
        .stdout(contains("Groceries"));
}

#[test]
fn direct_plan_drains_lowest_priority_and_applies() {
    let dir = initialized();
    pilot(&dir)
        .args(["spend", "Groceries", "400", "--day", "20"])
        .assert()
        .success();

    pilot(&dir)
        .args([
            "plan", "--mode", "direct", "--target", "Groceries", "--amount", "50", "--apply",
        ])
        .assert()
        .success()
        .stdout(contains("Move €50.00 from Leisure to Groceries"))
        .stdout(contains("Applied 1 transfer(s)"))
        .stdout(contains("WARNING").not());

    pilot(&dir)
        .arg("ledger")
        .assert()
        .success()
        .stdout(contains("€150.00"))
        .stdout(contains("€400.00"))
        .stdout(contains("over by").not());
}

#[test]
fn buffer_plan_reports_uncovered_remainder() {
    let dir = initialized();
    pilot(&dir)
        .args(["spend", "Groceries", "400", "--day", "20"])
        .assert()
        .success();

    pilot(&dir)
        .args(["plan", "--mode", "buffer", "--amount", "500"])
        .assert()
        .success()
        .stdout(contains("Overspend buffer"))
        .stdout(contains("WARNING: €335.00 could not be covered"));
}

#[test]
fn simulate_is_reproducible() {
    let first = initialized();
    let second = initialized();

    let run = |dir: &TempDir| {
        pilot(dir)
            .args(["simulate", "--day", "10", "--seed", "7"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(run(&first), run(&second));
}

#[test]
fn export_curve_csv_to_stdout() {
    let dir = initialized();

    pilot(&dir)
        .args(["export", "curve"])
        .assert()
        .success()
        .stdout(contains("category,day_of_month,avg_cumulative_fraction"))
        .stdout(contains("Transport,30,"));
}

#[test]
fn export_scenario_yaml_to_file() {
    let dir = initialized();
    let output = dir.path().join("snapshot.yaml");

    pilot(&dir)
        .args(["export", "scenario", "--day", "12", "--format", "yaml", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Scenario exported to"));

    let yaml = std::fs::read_to_string(&output).unwrap();
    assert!(yaml.starts_with("# Budget Pilot Scenario Export"));
    assert!(yaml.contains("forecast:"));
}

#[test]
fn custom_scenario_file() {
    let dir = initialized();
    let file = dir.path().join("household.json");
    std::fs::write(
        &file,
        r#"{
            "total_budget": 500,
            "categories": [
                {"name": "Rent", "budget": 400, "priority": 5, "spent_so_far": 420},
                {"name": "Fun", "budget": 100, "priority": 1}
            ],
            "as_of_day": 25
        }"#,
    )
    .unwrap();

    pilot(&dir)
        .arg("--file")
        .arg(&file)
        .args(["plan", "--basis", "overspend"])
        .assert()
        .success()
        .stdout(contains("Move €20.00 from Fun to Rent"));
}
