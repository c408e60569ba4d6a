//! CLI argument definitions for csocal.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `phase` | Active cycle phase |
//! | `dates` | All nine boundaries of the current cycle |
//! | `maturity` | Current, next and previous cycle maturities |
//! | `window` | Entry window available right now |
//! | `event-id` | Encode the period event ID for the current window |
//! | `split-id` / `unsplit-id` / `manual-id` | Encode trade and manual event IDs |
//! | `decode` | Decode any event ID |
//! | `length` | Length category of a period event ID |
//! | `months-before` | Maturity N cycles before the current one |
//! | `cycles-between` | Cycles elapsed since a previous expiry |
//! | `friday` | Upcoming and previous Friday 08:00 UTC |
//! | `schedule` | Minutes until a strategy starts or ends |
//! | `instrument` | Compose or parse Deribit option names |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--at` | system clock | Evaluate at this RFC3339 instant |
//! | `--at-ms` | system clock | Evaluate at these Unix epoch milliseconds |
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--verbose` | `false` | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! csocal phase --at 2022-06-25T16:00:00Z
//! csocal event-id --provider atomic --strategy-id call_spread_v1 --period monthly --pretty
//! csocal decode atomic-call_spread_v1-monthly-27JUN22-29JUL22
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use csocal_core::{OptionType, StrategyEvent, DEFAULT_MANUAL_SYMBOL, DEFAULT_MAX_TRIES};

/// Cycle calendar for monthly cyclic spread options.
///
/// Every command is evaluated at a single instant: `--at`, `--at-ms`, or the
/// system clock when neither is given.
#[derive(Debug, Parser)]
#[command(name = "csocal", author, version, about = "CSO cycle calendar")]
pub struct Cli {
    /// Evaluate at this RFC3339 instant (must be UTC).
    #[arg(long, global = true, conflicts_with = "at_ms")]
    pub at: Option<String>,

    /// Evaluate at these Unix epoch milliseconds.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub at_ms: Option<i64>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log at debug level on stderr. `RUST_LOG` takes precedence.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Metadata lines followed by indented data.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the active cycle phase.
    Phase,

    /// Show every boundary of the current cycle.
    Dates,

    /// Show the current, next and previous cycle maturities.
    Maturity,

    /// Show the entry window available right now.
    Window(WindowArgs),

    /// Encode the period event ID for the window available right now.
    ///
    /// # Examples
    ///
    ///   csocal event-id --provider atomic --strategy-id call_spread_v1
    ///   csocal event-id --provider atomic --strategy-id engine --extended
    EventId(EventIdArgs),

    /// Encode the event ID of one trade.
    SplitId(SplitIdArgs),

    /// Encode the event ID of a batch of trades starting now.
    UnsplitId(UnsplitIdArgs),

    /// Encode a manual event ID against an exchange maturity.
    ManualId(ManualIdArgs),

    /// Decode any event ID.
    Decode(EventIdInput),

    /// Classify the length of a period event ID.
    Length(EventIdInput),

    /// Maturity a number of cycles before the current one.
    MonthsBefore(MonthsBeforeArgs),

    /// Count cycles elapsed since a previous expiry.
    CyclesBetween(CyclesBetweenArgs),

    /// Show the upcoming and previous Friday 08:00 UTC.
    Friday,

    /// Minutes until a strategy's entry window starts or ends.
    Schedule(ScheduleArgs),

    /// Compose or parse Deribit option instrument names.
    Instrument(InstrumentArgs),
}

impl Command {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Phase => "phase",
            Self::Dates => "dates",
            Self::Maturity => "maturity",
            Self::Window(_) => "window",
            Self::EventId(_) => "event-id",
            Self::SplitId(_) => "split-id",
            Self::UnsplitId(_) => "unsplit-id",
            Self::ManualId(_) => "manual-id",
            Self::Decode(_) => "decode",
            Self::Length(_) => "length",
            Self::MonthsBefore(_) => "months-before",
            Self::CyclesBetween(_) => "cycles-between",
            Self::Friday => "friday",
            Self::Schedule(_) => "schedule",
            Self::Instrument(_) => "instrument",
        }
    }
}

/// Arguments for the `window` command.
#[derive(Debug, Args)]
pub struct WindowArgs {
    /// Extend the window to the following maturity.
    #[arg(long, default_value_t = false)]
    pub extended: bool,
}

/// Arguments for the `event-id` command.
#[derive(Debug, Args)]
pub struct EventIdArgs {
    #[arg(long)]
    pub provider: String,

    #[arg(long)]
    pub strategy_id: String,

    /// Period label (weekly, monthly, bimonthly).
    #[arg(long, default_value = "monthly")]
    pub period: String,

    /// Extend the window to the following maturity.
    #[arg(long, default_value_t = false)]
    pub extended: bool,
}

/// Arguments for the `split-id` command.
#[derive(Debug, Args)]
pub struct SplitIdArgs {
    #[arg(long)]
    pub provider: String,

    #[arg(long)]
    pub strategy_id: String,

    #[arg(long)]
    pub trade_index: u32,
}

/// Arguments for the `unsplit-id` command.
#[derive(Debug, Args)]
pub struct UnsplitIdArgs {
    #[arg(long)]
    pub provider: String,

    #[arg(long)]
    pub strategy_id: String,

    #[arg(long)]
    pub num_trades: u32,
}

/// Arguments for the `manual-id` command.
#[derive(Debug, Args)]
pub struct ManualIdArgs {
    #[arg(long)]
    pub provider: String,

    /// Venue the manual event was taken from (e.g. deribit).
    #[arg(long)]
    pub source: String,

    #[arg(long, default_value = DEFAULT_MANUAL_SYMBOL)]
    pub symbol: String,

    /// RFC3339 maturity. Defaults to the current cycle maturity.
    #[arg(long)]
    pub maturity: Option<String>,
}

/// A single event ID argument.
#[derive(Debug, Args)]
pub struct EventIdInput {
    pub event_id: String,
}

/// Arguments for the `months-before` command.
#[derive(Debug, Args)]
pub struct MonthsBeforeArgs {
    /// Number of cycles to step back (at least 1).
    pub months: u32,
}

/// Arguments for the `cycles-between` command.
#[derive(Debug, Args)]
pub struct CyclesBetweenArgs {
    /// RFC3339 instant of the earlier expiry.
    #[arg(long)]
    pub previous_expiry: String,

    /// Upper bound on maturities stepped through.
    #[arg(long, default_value_t = DEFAULT_MAX_TRIES)]
    pub max_tries: u32,
}

/// Arguments for the `schedule` command.
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// JSON strategy record containing `entryConditions`.
    #[arg(long)]
    pub strategy_file: PathBuf,

    #[arg(long, value_enum, default_value_t = StrategyEventArg::Start)]
    pub event: StrategyEventArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyEventArg {
    Start,
    End,
}

impl From<StrategyEventArg> for StrategyEvent {
    fn from(value: StrategyEventArg) -> Self {
        match value {
            StrategyEventArg::Start => Self::Start,
            StrategyEventArg::End => Self::End,
        }
    }
}

/// Arguments for the `instrument` command group.
#[derive(Debug, Args)]
pub struct InstrumentArgs {
    #[command(subcommand)]
    pub command: InstrumentCommand,
}

#[derive(Debug, Subcommand)]
pub enum InstrumentCommand {
    /// Build a name such as `BTC-1JAN19-120000-C`.
    Compose(ComposeArgs),

    /// Split a name into expiry, strike and type.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
pub struct ComposeArgs {
    /// RFC3339 expiry instant.
    #[arg(long)]
    pub expiry: String,

    #[arg(long)]
    pub strike: u64,

    #[arg(long = "type", value_enum)]
    pub option_type: OptionTypeArg,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionTypeArg {
    Call,
    Put,
}

impl From<OptionTypeArg> for OptionType {
    fn from(value: OptionTypeArg) -> Self {
        match value {
            OptionTypeArg::Call => Self::Call,
            OptionTypeArg::Put => Self::Put,
        }
    }
}
