use csocal_core::{
    current_cycle_maturity, current_phase, cycle_event_dates, entry_window, next_cycle_maturity,
    previous_cycle_maturity, CycleEventDates, EntryWindow, Phase, UtcInstant,
};
use serde::Serialize;

use crate::cli::WindowArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PhaseResponseData {
    phase: Phase,
    maturity: UtcInstant,
}

#[derive(Debug, Serialize)]
struct DatesResponseData {
    phase: Phase,
    dates: CycleEventDates,
}

#[derive(Debug, Serialize)]
struct MaturityResponseData {
    previous: UtcInstant,
    current: UtcInstant,
    next: UtcInstant,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowResponseData {
    extended: bool,
    #[serde(flatten)]
    window: EntryWindow,
}

pub fn phase(as_of: UtcInstant) -> Result<CommandResult, CliError> {
    let data = serde_json::to_value(PhaseResponseData {
        phase: current_phase(as_of)?,
        maturity: current_cycle_maturity(as_of)?,
    })?;

    Ok(CommandResult::ok(data))
}

pub fn dates(as_of: UtcInstant) -> Result<CommandResult, CliError> {
    let data = serde_json::to_value(DatesResponseData {
        phase: current_phase(as_of)?,
        dates: cycle_event_dates(as_of)?,
    })?;

    Ok(CommandResult::ok(data))
}

pub fn maturity(as_of: UtcInstant) -> Result<CommandResult, CliError> {
    let data = serde_json::to_value(MaturityResponseData {
        previous: previous_cycle_maturity(as_of)?,
        current: current_cycle_maturity(as_of)?,
        next: next_cycle_maturity(as_of)?,
    })?;

    Ok(CommandResult::ok(data))
}

pub fn window(args: &WindowArgs, as_of: UtcInstant) -> Result<CommandResult, CliError> {
    let window = entry_window(as_of, args.extended)?;
    tracing::debug!(start = %window.start_date, end = %window.end_date, "selected entry window");

    let data = serde_json::to_value(WindowResponseData {
        extended: args.extended,
        window,
    })?;

    Ok(CommandResult::ok(data))
}
