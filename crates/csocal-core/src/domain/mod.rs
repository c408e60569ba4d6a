//! # Domain Models
//!
//! Value types shared by every calendar operation.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`UtcInstant`] | Millisecond UTC instant, the engine's only notion of time |
//! | [`Phase`] | Named sub-interval of a monthly cycle |
//! | [`CsoPeriod`] | Cadence label in period event IDs |
//! | [`CsoLength`] | Span of a period event (half, full, 1.5 or 2 months) |
//! | [`StrategySchedule`] | Entry conditions used for weekly scheduling |
//!
//! All types are immutable values; operations return new values instead of
//! mutating their inputs.

mod instant;
mod phase;
mod strategy;

pub use instant::UtcInstant;
pub use phase::{CsoLength, CsoPeriod, Phase};
pub use strategy::{DayOfWeek, EntryConditions, Recurring, StrategySchedule};
