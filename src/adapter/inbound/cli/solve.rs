//! Handler for the `solve` command.

use std::path::Path;

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::debug;

use super::command::SolveArgs;
use super::output;
use super::scenario::Scenario;
use crate::application::engine::Engine;
use crate::domain::house::House;
use crate::domain::profit::{HouseResult, Results};
use crate::domain::state::Granularity;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct HouseRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Odd")]
    odd: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Liability")]
    liability: String,
    #[tabled(rename = "Commission")]
    commission: String,
    #[tabled(rename = "Profit")]
    profit: String,
}

impl HouseRow {
    fn new(house: &House, result: &HouseResult, anchor: Option<usize>) -> Self {
        let kind = match (house.is_lay, house.is_freebet) {
            (true, _) => "lay",
            (false, true) => "freebet",
            (false, false) => "back",
        };
        let mark = if anchor == Some(result.index) { "*" } else { "" };
        Self {
            index: result.index,
            kind,
            odd: format!("{:.2}{mark}", result.final_odd),
            stake: format!("{:.2}", result.stake),
            liability: result
                .liability
                .map_or_else(|| "-".to_string(), |value| format!("{value:.2}")),
            commission: if house.commission.is_enabled() {
                format!("{}%", house.commission.percent().normalize())
            } else {
                "-".to_string()
            },
            profit: format!("{:.2}", result.profit),
        }
    }
}

/// Execute `solve`.
///
/// # Errors
///
/// Returns an error when the config or scenario cannot be loaded or a
/// scenario value is out of range.
pub fn execute(args: &SolveArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    let mut scenario = Scenario::load(&args.scenario)?;
    if let Some(houses) = args.houses {
        scenario.houses = Some(houses);
    }
    if let Some(rounding) = &args.rounding {
        scenario.rounding = Some(rounding.parse::<Granularity>()?.step());
    }

    let mut engine = Engine::new(config.engine_settings()?);
    scenario.apply(&mut engine)?;
    let results = engine.results();
    debug!(
        houses = %engine.state().house_count(),
        total_stake = %results.total_stake,
        worst_case = %results.worst_case_profit,
        roi = %results.roi,
        "Scenario solved"
    );

    if output::is_json() {
        output::json_output(json!({
            "command": "solve",
            "scenario": args.scenario.display().to_string(),
            "houses": engine.state().house_count(),
            "rounding": engine.state().granularity(),
            "anchor": engine.state().anchor_index(),
            "convergence": engine.report(),
            "results": results,
        }));
        return Ok(());
    }

    render(&engine, &results, &args.scenario);
    Ok(())
}

fn render(engine: &Engine, results: &Results, scenario: &Path) {
    let state = engine.state();
    let anchor = state.anchor_index();

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Scenario");
    output::field("File", scenario.display());
    output::field("Houses", state.house_count());
    output::field("Rounding", state.granularity());
    output::field(
        "Anchor",
        anchor.map_or_else(|| output::muted("none"), |index| index.to_string()),
    );

    output::section("Houses");
    let rows: Vec<HouseRow> = state
        .active_houses()
        .iter()
        .zip(&results.houses)
        .map(|(house, result)| HouseRow::new(house, result, anchor))
        .collect();
    output::lines(&Table::new(rows).to_string());
    if anchor.is_some() {
        output::note("* anchor house");
    }

    output::section("Summary");
    output::field("Total stake", format!("{:.2}", results.total_stake));
    if results.total_freebet_value > Decimal::ZERO {
        output::field(
            "Freebet value",
            format!("{:.2}", results.total_freebet_value),
        );
    }
    output::field(
        "Worst case",
        output::signed(results.worst_case_profit.round_dp(2)),
    );
    output::field("ROI", format!("{}%", output::signed(results.roi.round_dp(2))));

    let report = engine.report();
    if !report.converged {
        output::warning(&format!(
            "stakes did not settle after {} passes; showing the last computed values",
            report.iterations
        ));
    }
}
