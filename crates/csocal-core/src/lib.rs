//! # csocal Core
//!
//! Calendar engine for monthly cyclic spread option (CSO) cycles.
//!
//! ## Overview
//!
//! Given an instant supplied by the caller, this crate derives:
//!
//! - the cycle maturity (last Friday of the month, 08:00 UTC) the instant belongs to
//! - the nine event boundaries of that cycle and the active [`Phase`]
//! - the entry window a new position would be opened into
//! - durable event IDs naming cycle windows, trades and manual events
//!
//! Nothing here reads the system clock, performs I/O or logs.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`calendar`] | Maturities, cycle boundaries, phases, entry windows, cycle distance |
//! | [`deribit`] | Deribit date tokens and option instrument names |
//! | [`domain`] | `UtcInstant`, phase and period enums, strategy records |
//! | [`error`] | [`CalendarError`] |
//! | [`event_id`] | Event-ID encoders, decoders and the [`EventId`] dispatcher |
//! | [`schedule`] | Minutes until a strategy starts or ends |
//!
//! ## Quick Start
//!
//! ```rust
//! use csocal_core::{current_phase, encode_event_id, CsoPeriod, Phase, UtcInstant};
//!
//! # fn main() -> Result<(), csocal_core::CalendarError> {
//! let now = UtcInstant::parse("2022-06-25T16:00:00Z")?;
//!
//! assert_eq!(current_phase(now)?, Phase::NewEntryOpen);
//! assert_eq!(
//!     encode_event_id(now, "atomic", "call_spread_v1", CsoPeriod::Monthly, false)?,
//!     "atomic-call_spread_v1-monthly-27JUN22-29JUL22"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Cycle offsets
//!
//! The hour offsets in [`calendar`] are part of the event-ID contract: IDs
//! already stored elsewhere decode against them, so they are constants rather
//! than configuration.

pub mod calendar;
pub mod deribit;
pub mod domain;
pub mod error;
pub mod event_id;
pub mod schedule;

pub use calendar::{
    current_cycle_maturity, current_phase, cycle_event_dates, cycles_between, entry_window,
    last_friday_of_month, months_before_maturity, next_cycle_maturity, previous_cycle_maturity,
    previous_friday, upcoming_friday, CycleEventDates, EntryWindow, DEFAULT_MAX_TRIES,
};
pub use deribit::{
    compose_instrument_name, format_date_token, parse_date_token, parse_instrument_name,
    DateToken, OptionInstrument, OptionType,
};
pub use domain::{
    CsoLength, CsoPeriod, DayOfWeek, EntryConditions, Phase, Recurring, StrategySchedule,
    UtcInstant,
};
pub use error::CalendarError;
pub use event_id::{
    classify_event_id, cso_length, decode_event_id, decode_manual_id, decode_split_id,
    decode_token, decode_unsplit_id, encode_event_id, encode_manual_id, encode_split_id,
    encode_unsplit_id, is_half_month, EventId, EventIdKind, ManualEvent, PeriodEvent, SplitEvent,
    UnsplitEvent, DEFAULT_MANUAL_SYMBOL,
};
pub use schedule::{
    days_until, minutes_until, minutes_until_strategy_end, minutes_until_strategy_event,
    minutes_until_strategy_start, round_to_x_hour, StrategyEvent, TIME_MINUTES_7_DAYS,
};
