use thiserror::Error;

use crate::domain::{Phase, UtcInstant};

/// Validation and contract errors exposed by `csocal-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error(
        "invalid date provided with timestamp {millis} (year {year}), you may have used {suspected_unit} instead of milliseconds"
    )]
    TimestampOutOfRange {
        millis: i64,
        year: i32,
        suspected_unit: &'static str,
    },
    #[error("timestamp {millis} cannot be represented as a UTC date")]
    UnrepresentableTimestamp { millis: i64 },
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidCalendarDate { year: i32, month: u8, day: u8 },
    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    InvalidTimestamp { value: String },

    #[error("invalid eventId provided: {event_id}. Expected format {expected}")]
    InvalidEventIdFormat {
        event_id: String,
        expected: &'static str,
    },
    #[error("invalid date token '{value}', expected [day][MON][YY] e.g. 27JUN22")]
    InvalidDateToken { value: String },
    #[error("invalid tradeIndex provided: {value}. Expected integer")]
    InvalidTradeIndex { value: String },
    #[error("invalid numTrades provided: {value}. Expected integer")]
    InvalidTradeCount { value: String },
    #[error("eventId segment '{field}' must be non-empty and must not contain '-': '{value}'")]
    InvalidSegment { field: &'static str, value: String },
    #[error("invalid period '{value}', expected one of weekly, monthly, bimonthly")]
    InvalidPeriod { value: String },
    #[error("invalid phase '{value}'")]
    InvalidPhase { value: String },
    #[error("invalid day of week {value}, expected -1 through 7")]
    InvalidDayOfWeek { value: i8 },
    #[error("unsupported instrument name: {value}")]
    UnsupportedInstrument { value: String },

    #[error("eventId date token {token} is not a cycle boundary and likely on rollover weekend (phase {phase})")]
    AmbiguousToken { token: String, phase: Phase },

    #[error("numMonths must be at least 1")]
    ZeroMonths,
    #[error("previous expiry {previous_expiry} should be less than current date {now}")]
    ExpiryNotBeforeNow {
        previous_expiry: UtcInstant,
        now: UtcInstant,
    },
    #[error("previous expiry {previous_expiry} should be in time period dlcExpiry, found {phase}")]
    ExpiryOutsideDlcExpiry {
        previous_expiry: UtcInstant,
        phase: Phase,
    },
    #[error("could not find cycle maturity in the past after checking {max_tries} months")]
    SearchExhausted { max_tries: u32 },

    #[error("strategy offset of {offset} minutes is out of range")]
    ScheduleOffsetOutOfRange { offset: i64 },

    #[error("instant {instant} does not fall inside any phase of its cycle")]
    PhaseUnresolved { instant: UtcInstant },
}
