use csocal_core::{
    cso_length, current_cycle_maturity, encode_event_id, encode_manual_id,
    encode_split_id, encode_unsplit_id, is_half_month, CsoLength, CsoPeriod, EventId, UtcInstant,
};
use serde::Serialize;

use crate::cli::{EventIdArgs, EventIdInput, ManualIdArgs, SplitIdArgs, UnsplitIdArgs};
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EncodedResponseData {
    event_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LengthResponseData {
    event_id: String,
    half_month: bool,
    length: CsoLength,
}

pub fn encode_period(args: &EventIdArgs, as_of: UtcInstant) -> Result<CommandResult, CliError> {
    let period = args.period.parse::<CsoPeriod>()?;
    let event_id = encode_event_id(
        as_of,
        &args.provider,
        &args.strategy_id,
        period,
        args.extended,
    )?;

    encoded(event_id)
}

pub fn encode_split(args: &SplitIdArgs) -> Result<CommandResult, CliError> {
    encoded(encode_split_id(
        &args.provider,
        &args.strategy_id,
        args.trade_index,
    )?)
}

pub fn encode_unsplit(args: &UnsplitIdArgs, as_of: UtcInstant) -> Result<CommandResult, CliError> {
    encoded(encode_unsplit_id(
        as_of,
        &args.provider,
        &args.strategy_id,
        args.num_trades,
    )?)
}

pub fn encode_manual(args: &ManualIdArgs, as_of: UtcInstant) -> Result<CommandResult, CliError> {
    let cycle_maturity = current_cycle_maturity(as_of)?;
    let maturity = match &args.maturity {
        Some(text) => UtcInstant::parse(text)?,
        None => cycle_maturity,
    };

    let event_id = encode_manual_id(&args.provider, &args.source, maturity, &args.symbol)?;
    let mut result = encoded(event_id)?;
    if maturity.date() != cycle_maturity.date() {
        result = result.with_warning(format!(
            "maturity {maturity} is not the current cycle maturity {cycle_maturity}"
        ));
    }

    Ok(result)
}

pub fn decode(args: &EventIdInput) -> Result<CommandResult, CliError> {
    let event_id = EventId::parse(&args.event_id)?;
    tracing::debug!(kind = %event_id.kind(), "decoded event id");

    let warning = match &event_id {
        EventId::Period(event) if event.period.parse::<CsoPeriod>().is_err() => {
            Some(format!("unrecognised period label '{}'", event.period))
        }
        _ => None,
    };

    let mut result = CommandResult::ok(serde_json::to_value(&event_id)?);
    if let Some(warning) = warning {
        result = result.with_warning(warning);
    }

    Ok(result)
}

pub fn length(args: &EventIdInput) -> Result<CommandResult, CliError> {
    let length = cso_length(&args.event_id)?;
    let half_month = is_half_month(&args.event_id)?;

    let data = serde_json::to_value(LengthResponseData {
        event_id: args.event_id.clone(),
        half_month,
        length,
    })?;

    Ok(CommandResult::ok(data))
}

fn encoded(event_id: String) -> Result<CommandResult, CliError> {
    let data = serde_json::to_value(EncodedResponseData { event_id })?;
    Ok(CommandResult::ok(data))
}
