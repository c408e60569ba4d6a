use std::fs;
use std::path::Path;

use csocal_core::{
    minutes_until_strategy_event, previous_friday, upcoming_friday, StrategyEvent,
    StrategySchedule, UtcInstant,
};
use serde::Serialize;
use time::Duration;

use crate::cli::ScheduleArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct FridayResponseData {
    upcoming: UtcInstant,
    previous: UtcInstant,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleResponseData {
    event: StrategyEvent,
    minutes: f64,
    at: UtcInstant,
}

pub fn friday(as_of: UtcInstant) -> Result<CommandResult, CliError> {
    let data = serde_json::to_value(FridayResponseData {
        upcoming: upcoming_friday(as_of)?,
        previous: previous_friday(as_of)?,
    })?;

    Ok(CommandResult::ok(data))
}

pub fn schedule(args: &ScheduleArgs, as_of: UtcInstant) -> Result<CommandResult, CliError> {
    let schedule = load_schedule(&args.strategy_file)?;
    let event = StrategyEvent::from(args.event);
    let minutes = minutes_until_strategy_event(as_of, &schedule, event)?;
    let at = as_of.checked_add(Duration::milliseconds((minutes * 60_000.0).round() as i64))?;

    let data = serde_json::to_value(ScheduleResponseData { event, minutes, at })?;
    Ok(CommandResult::ok(data))
}

fn load_schedule(path: &Path) -> Result<StrategySchedule, CliError> {
    tracing::debug!(path = %path.display(), "reading strategy file");
    let contents = fs::read_to_string(path)?;

    StrategySchedule::from_json(&contents).map_err(|source| CliError::StrategyFile {
        path: path.display().to_string(),
        source,
    })
}
