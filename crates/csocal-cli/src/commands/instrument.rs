use csocal_core::{compose_instrument_name, parse_instrument_name, OptionInstrument, UtcInstant};
use serde::Serialize;

use crate::cli::{InstrumentArgs, InstrumentCommand};
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct InstrumentResponseData {
    name: String,
    instrument: OptionInstrument,
}

pub fn run(args: &InstrumentArgs) -> Result<CommandResult, CliError> {
    let instrument = match &args.command {
        InstrumentCommand::Compose(compose) => OptionInstrument {
            expiry: UtcInstant::parse(&compose.expiry)?,
            strike_price: compose.strike,
            option_type: compose.option_type.into(),
        },
        InstrumentCommand::Parse(parse) => parse_instrument_name(&parse.name)?,
    };

    let data = serde_json::to_value(InstrumentResponseData {
        name: compose_instrument_name(&instrument),
        instrument,
    })?;

    Ok(CommandResult::ok(data))
}
