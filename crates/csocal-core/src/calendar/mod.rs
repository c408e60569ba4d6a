//! Monthly option-cycle calendar.
//!
//! A cycle runs from one maturity (last Friday of a month, 08:00 UTC) to the
//! next and is split into eight phases:
//!
//! ```text
//! previous expiry ─7h─▶ attestation ─1h─▶ rollover ─24h─▶ new entry open ─36h─▶
//! new entry closed ─8h─▶ trading open ─ … ─▶ half-month entry closed ─6h─▶
//! half-month trading open ─334h─▶ upcoming expiry
//! ```
//!
//! Everything here is a pure function of the instant passed in.

mod distance;
mod events;
mod maturity;
mod weekly;
mod window;

pub use distance::{cycles_between, months_before_maturity, DEFAULT_MAX_TRIES};
pub use events::{
    current_phase, cycle_event_dates, CycleEventDates, DLC_ATTESTATION_LEN, DLC_EXPIRY_LEN,
    HALF_MONTH_ENTRY_CLOSED_LEN, NEW_ENTRY_CLOSED_LEN, NEW_ENTRY_OPEN_LEN, ROLLOVER_OPEN_LEN,
    TRADING_OPEN_HALF_MONTH_LEN,
};
pub(crate) use events::phase_within;
pub use maturity::{
    current_cycle_maturity, last_friday_of_month, next_cycle_maturity, previous_cycle_maturity,
    MATURITY_HOUR, MAX_CYCLE_YEAR, MIN_CYCLE_YEAR,
};
pub use weekly::{previous_friday, upcoming_friday};
pub use window::{entry_window, EntryWindow};
