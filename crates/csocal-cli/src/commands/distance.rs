use csocal_core::{months_before_maturity, UtcInstant};
use serde::Serialize;

use crate::cli::{CyclesBetweenArgs, MonthsBeforeArgs};
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct MonthsBeforeResponseData {
    months: u32,
    maturity: UtcInstant,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CyclesBetweenResponseData {
    previous_expiry: UtcInstant,
    cycles: u32,
}

pub fn months_before(args: &MonthsBeforeArgs, as_of: UtcInstant) -> Result<CommandResult, CliError> {
    let data = serde_json::to_value(MonthsBeforeResponseData {
        months: args.months,
        maturity: months_before_maturity(as_of, args.months)?,
    })?;

    Ok(CommandResult::ok(data))
}

pub fn cycles_between(
    args: &CyclesBetweenArgs,
    as_of: UtcInstant,
) -> Result<CommandResult, CliError> {
    let previous_expiry = UtcInstant::parse(&args.previous_expiry)?;
    let cycles = csocal_core::cycles_between(as_of, previous_expiry, args.max_tries)?;
    tracing::debug!(cycles, max_tries = args.max_tries, "counted cycles");

    let data = serde_json::to_value(CyclesBetweenResponseData {
        previous_expiry,
        cycles,
    })?;

    Ok(CommandResult::ok(data))
}
