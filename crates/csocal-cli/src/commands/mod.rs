mod cycle;
mod distance;
mod event_id;
mod instrument;
mod weekly;

use csocal_core::UtcInstant;
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::envelope::{Envelope, EnvelopeMeta};
use crate::error::CliError;

#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let as_of = resolve_as_of(cli)?;
    debug!(command = cli.command.name(), %as_of, "evaluating command");

    let command_result = match &cli.command {
        Command::Phase => cycle::phase(as_of)?,
        Command::Dates => cycle::dates(as_of)?,
        Command::Maturity => cycle::maturity(as_of)?,
        Command::Window(args) => cycle::window(args, as_of)?,
        Command::EventId(args) => event_id::encode_period(args, as_of)?,
        Command::SplitId(args) => event_id::encode_split(args)?,
        Command::UnsplitId(args) => event_id::encode_unsplit(args, as_of)?,
        Command::ManualId(args) => event_id::encode_manual(args, as_of)?,
        Command::Decode(args) => event_id::decode(args)?,
        Command::Length(args) => event_id::length(args)?,
        Command::MonthsBefore(args) => distance::months_before(args, as_of)?,
        Command::CyclesBetween(args) => distance::cycles_between(args, as_of)?,
        Command::Friday => weekly::friday(as_of)?,
        Command::Schedule(args) => weekly::schedule(args, as_of)?,
        Command::Instrument(args) => instrument::run(args)?,
    };

    let CommandResult { data, warnings } = command_result;

    let mut meta = EnvelopeMeta::new(as_of);
    for warning in warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope::success(meta, data))
}

/// The only place the system clock is read.
fn resolve_as_of(cli: &Cli) -> Result<UtcInstant, CliError> {
    let as_of = match (&cli.at, cli.at_ms) {
        (Some(text), _) => UtcInstant::parse(text)?,
        (None, Some(millis)) => UtcInstant::from_unix_millis(millis)?,
        (None, None) => UtcInstant::now(),
    };

    Ok(as_of)
}
