//! Hyphen-delimited event identifiers shared across the platform.
//!
//! | Kind | Shape | Example |
//! |------|-------|---------|
//! | period | `provider-strategyId-period-start-end` | `atomic-call_spread_v1-monthly-27JUN22-29JUL22` |
//! | split | `provider-strategyId-trade-index` | `atomic-oyster-trade-84` |
//! | unsplit | `provider-strategyId-count-trades-date` | `atomic-oyster-5-trades-1JAN24` |
//! | manual | `provider-source-symbol-maturity` | `atomic-deribit-BTC-29JUL22` |
//!
//! Period dates are cycle boundaries and decode back to the exact boundary
//! instant. Stored IDs depend on the cycle offsets in [`crate::calendar`], so
//! those offsets cannot change without migrating existing IDs.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::calendar::{cycle_event_dates, entry_window, phase_within};
use crate::deribit::{format_date_token, DateToken, EXPIRY_HOUR};
use crate::{CalendarError, CsoLength, CsoPeriod, Phase, UtcInstant};

/// Hour a date token is provisionally placed at before it is matched to a
/// boundary; it lies inside the expiry phase and after both trading opens.
pub const GENERIC_TOKEN_HOUR: u8 = 12;
/// Symbol used for manual events unless another one is given.
pub const DEFAULT_MANUAL_SYMBOL: &str = "BTC";

const SPLIT_MARKER: &str = "trade";
const UNSPLIT_MARKER: &str = "trades";

const PERIOD_FORMAT: &str = "[provider]-[strategyId]-[period]-[startDate]-[endDate]";
const SPLIT_FORMAT: &str = "[provider]-[strategyId]-[trade]-[tradeIndex]";
const UNSPLIT_FORMAT: &str = "[provider]-[strategyId]-[numTrades]-[trades]-[startDate]";
const MANUAL_FORMAT: &str = "[provider]-[source]-[symbol]-[maturity]";
const ANY_FORMAT: &str = "a period, split, unsplit or manual event ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventIdKind {
    Period,
    Split,
    Unsplit,
    Manual,
}

impl EventIdKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Period => "period",
            Self::Split => "split",
            Self::Unsplit => "unsplit",
            Self::Manual => "manual",
        }
    }
}

impl Display for EventIdKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A full- or half-month cycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodEvent {
    pub provider: String,
    pub strategy_id: String,
    pub period: String,
    pub start_date: UtcInstant,
    pub end_date: UtcInstant,
}

/// One trade of a strategy whose trades are tracked individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitEvent {
    pub provider: String,
    pub strategy_id: String,
    pub trade_index: u32,
}

/// A batch of trades starting on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsplitEvent {
    pub provider: String,
    pub strategy_id: String,
    pub num_trades: u32,
    pub start_date: UtcInstant,
}

/// An event created by hand against an exchange maturity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEvent {
    pub provider: String,
    pub source: String,
    pub symbol: String,
    pub maturity: UtcInstant,
}

/// Any decoded event ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EventId {
    Period(PeriodEvent),
    Split(SplitEvent),
    Unsplit(UnsplitEvent),
    Manual(ManualEvent),
}

impl EventId {
    pub fn parse(event_id: &str) -> Result<Self, CalendarError> {
        match classify_event_id(event_id)? {
            EventIdKind::Period => decode_event_id(event_id).map(Self::Period),
            EventIdKind::Split => decode_split_id(event_id).map(Self::Split),
            EventIdKind::Unsplit => decode_unsplit_id(event_id).map(Self::Unsplit),
            EventIdKind::Manual => decode_manual_id(event_id).map(Self::Manual),
        }
    }

    pub const fn kind(&self) -> EventIdKind {
        match self {
            Self::Period(_) => EventIdKind::Period,
            Self::Split(_) => EventIdKind::Split,
            Self::Unsplit(_) => EventIdKind::Unsplit,
            Self::Manual(_) => EventIdKind::Manual,
        }
    }
}

impl FromStr for EventId {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Period(event) => event.fmt(f),
            Self::Split(event) => event.fmt(f),
            Self::Unsplit(event) => event.fmt(f),
            Self::Manual(event) => event.fmt(f),
        }
    }
}

impl Display for PeriodEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-{}",
            self.provider,
            self.strategy_id,
            self.period,
            format_date_token(self.start_date),
            format_date_token(self.end_date)
        )
    }
}

impl Display for SplitEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{SPLIT_MARKER}-{}",
            self.provider, self.strategy_id, self.trade_index
        )
    }
}

impl Display for UnsplitEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{UNSPLIT_MARKER}-{}",
            self.provider,
            self.strategy_id,
            self.num_trades,
            format_date_token(self.start_date)
        )
    }
}

impl Display for ManualEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.provider,
            self.source,
            self.symbol,
            format_date_token(self.maturity)
        )
    }
}

/// Event ID of the window that can be entered into immediately at `t`,
/// e.g. `atomic-call_spread_v1-monthly-27JUN22-29JUL22`.
pub fn encode_event_id(
    t: UtcInstant,
    provider: &str,
    strategy_id: &str,
    period: CsoPeriod,
    force_extended: bool,
) -> Result<String, CalendarError> {
    validate_segment("provider", provider)?;
    validate_segment("strategyId", strategy_id)?;

    let window = entry_window(t, force_extended)?;
    let event = PeriodEvent {
        provider: provider.to_owned(),
        strategy_id: strategy_id.to_owned(),
        period: period.as_str().to_owned(),
        start_date: window.start_date,
        end_date: window.end_date,
    };

    Ok(event.to_string())
}

pub fn decode_event_id(event_id: &str) -> Result<PeriodEvent, CalendarError> {
    let [provider, strategy_id, period, start, end] =
        split_segments::<5>(event_id, PERIOD_FORMAT)?;

    for token in [start, end] {
        DateToken::parse(token)?;
    }

    Ok(PeriodEvent {
        provider: provider.to_owned(),
        strategy_id: strategy_id.to_owned(),
        period: period.to_owned(),
        start_date: decode_token(start)?,
        end_date: decode_token(end)?,
    })
}

/// Resolves a period date token to the cycle boundary it names.
///
/// Trading-open days resolve to that cycle's entry close, half-month days to
/// the half-month trading open, and expiry days to the expiry itself. Any
/// other day (typically the rollover weekend) is not a boundary.
pub fn decode_token(token: &str) -> Result<UtcInstant, CalendarError> {
    let parsed = DateToken::parse(token)?;
    let provisional = parsed.at_hour(GENERIC_TOKEN_HOUR)?;
    let dates = cycle_event_dates(provisional)?;
    let phase = phase_within(&dates, provisional)?;
    let day = parsed.day();

    let boundary = match phase {
        Phase::TradingOpen if dates.trading_open.day() == day => Some(dates.new_entry_closed),
        Phase::TradingOpenHalfMonth if dates.trading_open_half_month.day() == day => {
            Some(dates.trading_open_half_month)
        }
        Phase::DlcExpiry if dates.upcoming_dlc_expiry.day() == day => {
            Some(dates.upcoming_dlc_expiry)
        }
        Phase::DlcExpiry if dates.previous_dlc_expiry.day() == day => {
            Some(dates.previous_dlc_expiry)
        }
        _ => None,
    };

    boundary.ok_or_else(|| CalendarError::AmbiguousToken {
        token: token.to_owned(),
        phase,
    })
}

/// e.g. `atomic-oyster-trade-84`.
pub fn encode_split_id(
    provider: &str,
    strategy_id: &str,
    trade_index: u32,
) -> Result<String, CalendarError> {
    validate_segment("provider", provider)?;
    validate_segment("strategyId", strategy_id)?;

    Ok(SplitEvent {
        provider: provider.to_owned(),
        strategy_id: strategy_id.to_owned(),
        trade_index,
    }
    .to_string())
}

pub fn decode_split_id(event_id: &str) -> Result<SplitEvent, CalendarError> {
    let [provider, strategy_id, _, index] = split_segments::<4>(event_id, SPLIT_FORMAT)?;
    let trade_index = index
        .parse::<u32>()
        .map_err(|_| CalendarError::InvalidTradeIndex {
            value: index.to_owned(),
        })?;

    Ok(SplitEvent {
        provider: provider.to_owned(),
        strategy_id: strategy_id.to_owned(),
        trade_index,
    })
}

/// e.g. `atomic-oyster-5-trades-1JAN24`.
pub fn encode_unsplit_id(
    t: UtcInstant,
    provider: &str,
    strategy_id: &str,
    num_trades: u32,
) -> Result<String, CalendarError> {
    validate_segment("provider", provider)?;
    validate_segment("strategyId", strategy_id)?;

    Ok(UnsplitEvent {
        provider: provider.to_owned(),
        strategy_id: strategy_id.to_owned(),
        num_trades,
        start_date: t,
    }
    .to_string())
}

/// The start date comes back at 12:00 UTC of the encoded day.
pub fn decode_unsplit_id(event_id: &str) -> Result<UnsplitEvent, CalendarError> {
    let [provider, strategy_id, count, _, start] =
        split_segments::<5>(event_id, UNSPLIT_FORMAT)?;
    let num_trades = count
        .parse::<u32>()
        .map_err(|_| CalendarError::InvalidTradeCount {
            value: count.to_owned(),
        })?;
    let start_date = DateToken::parse(start)?.at_hour(GENERIC_TOKEN_HOUR)?;

    Ok(UnsplitEvent {
        provider: provider.to_owned(),
        strategy_id: strategy_id.to_owned(),
        num_trades,
        start_date,
    })
}

/// e.g. `atomic-deribit-BTC-29JUL22`. Pass [`DEFAULT_MANUAL_SYMBOL`] for BTC.
pub fn encode_manual_id(
    provider: &str,
    source: &str,
    maturity: UtcInstant,
    symbol: &str,
) -> Result<String, CalendarError> {
    validate_segment("provider", provider)?;
    validate_segment("source", source)?;
    validate_segment("symbol", symbol)?;

    Ok(ManualEvent {
        provider: provider.to_owned(),
        source: source.to_owned(),
        symbol: symbol.to_owned(),
        maturity,
    }
    .to_string())
}

/// The maturity comes back at 08:00 UTC of the encoded day.
pub fn decode_manual_id(event_id: &str) -> Result<ManualEvent, CalendarError> {
    let [provider, source, symbol, maturity] = split_segments::<4>(event_id, MANUAL_FORMAT)?;
    let maturity = DateToken::parse(maturity)?.at_hour(EXPIRY_HOUR)?;

    Ok(ManualEvent {
        provider: provider.to_owned(),
        source: source.to_owned(),
        symbol: symbol.to_owned(),
        maturity,
    })
}

pub fn classify_event_id(event_id: &str) -> Result<EventIdKind, CalendarError> {
    let segments = event_id.split('-').collect::<Vec<_>>();

    match segments.as_slice() {
        [_, _, _, marker, _] if *marker == UNSPLIT_MARKER => Ok(EventIdKind::Unsplit),
        [_, _, _, _, _] => Ok(EventIdKind::Period),
        [_, _, marker, _] if *marker == SPLIT_MARKER => Ok(EventIdKind::Split),
        [_, _, _, _] => Ok(EventIdKind::Manual),
        _ => Err(CalendarError::InvalidEventIdFormat {
            event_id: event_id.to_owned(),
            expected: ANY_FORMAT,
        }),
    }
}

/// Whether a period event starts on a half-month boundary.
pub fn is_half_month(event_id: &str) -> Result<bool, CalendarError> {
    let start = decode_event_id(event_id)?.start_date;
    let dates = cycle_event_dates(start)?;

    Ok(start == dates.trading_open_half_month || start == dates.half_month_entry_closed)
}

pub fn cso_length(event_id: &str) -> Result<CsoLength, CalendarError> {
    let event = decode_event_id(event_id)?;
    let days = (event.end_date - event.start_date).whole_days();

    let length = if is_half_month(event_id)? {
        if days > 30 {
            CsoLength::OneAndAHalfMonths
        } else {
            CsoLength::HalfMonth
        }
    } else if days > 45 {
        CsoLength::TwoMonths
    } else {
        CsoLength::FullMonth
    };

    Ok(length)
}

fn split_segments<'a, const N: usize>(
    event_id: &'a str,
    expected: &'static str,
) -> Result<[&'a str; N], CalendarError> {
    let segments = event_id.split('-').collect::<Vec<_>>();
    <[&str; N]>::try_from(segments).map_err(|_| CalendarError::InvalidEventIdFormat {
        event_id: event_id.to_owned(),
        expected,
    })
}

fn validate_segment(field: &'static str, value: &str) -> Result<(), CalendarError> {
    if value.is_empty() || value.contains('-') {
        return Err(CalendarError::InvalidSegment {
            field,
            value: value.to_owned(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u8, day: u8, hour: u8) -> UtcInstant {
        UtcInstant::from_ymd_hms_milli(year, month, day, hour, 0, 0, 0).expect("valid instant")
    }

    #[test]
    fn encodes_full_month_event() {
        let id = encode_event_id(
            at(2022, 6, 25, 16),
            "atomic",
            "call_spread_v1",
            CsoPeriod::Monthly,
            false,
        )
        .expect("ok");

        assert_eq!(id, "atomic-call_spread_v1-monthly-27JUN22-29JUL22");
    }

    #[test]
    fn encodes_half_month_event() {
        let id = encode_event_id(at(2023, 7, 13, 4), "atomic", "engine", CsoPeriod::Monthly, false)
            .expect("ok");
        assert_eq!(id, "atomic-engine-monthly-14JUL23-28JUL23");

        let extended =
            encode_event_id(at(2023, 7, 13, 4), "atomic", "engine", CsoPeriod::Monthly, true)
                .expect("ok");
        assert_eq!(extended, "atomic-engine-monthly-14JUL23-25AUG23");
    }

    #[test]
    fn decodes_period_tokens_to_boundaries() {
        let event = decode_event_id("atomic-call_spread_v1-monthly-27JUN22-29JUL22").expect("ok");

        assert_eq!(event.provider, "atomic");
        assert_eq!(event.strategy_id, "call_spread_v1");
        assert_eq!(event.period, "monthly");
        assert_eq!(event.start_date, at(2022, 6, 27, 4));
        assert_eq!(event.end_date, at(2022, 7, 29, 8));
    }

    #[test]
    fn half_month_token_snaps_to_half_month_trading_open() {
        assert_eq!(decode_token("14JUL23").expect("ok"), at(2023, 7, 14, 10));
    }

    #[test]
    fn rollover_weekend_token_is_ambiguous() {
        let err = decode_token("25JUN22").expect_err("must fail");
        assert!(matches!(
            err,
            CalendarError::AmbiguousToken {
                phase: Phase::RolloverOpen,
                ..
            }
        ));

        let err = decode_token("5JUL22").expect_err("must fail");
        assert!(matches!(
            err,
            CalendarError::AmbiguousToken {
                phase: Phase::TradingOpen,
                ..
            }
        ));
    }

    #[test]
    fn period_id_with_extra_segment_is_rejected() {
        let err = decode_event_id("invalid-atomic-call_spread_v1-monthly-27JUN22-29JUL22")
            .expect_err("must fail");
        assert!(matches!(err, CalendarError::InvalidEventIdFormat { .. }));
    }

    #[test]
    fn period_id_with_bad_token_is_rejected() {
        let err = decode_event_id("atomic-call_spread_v1-monthly-27JUN22-JULY").expect_err("fail");
        assert!(matches!(err, CalendarError::InvalidDateToken { .. }));
    }

    #[test]
    fn split_ids_round_trip() {
        let id = encode_split_id("atomic", "engine", 44).expect("ok");
        assert_eq!(id, "atomic-engine-trade-44");

        let event = decode_split_id(&id).expect("ok");
        assert_eq!(
            event,
            SplitEvent {
                provider: String::from("atomic"),
                strategy_id: String::from("engine"),
                trade_index: 44,
            }
        );
    }

    #[test]
    fn split_id_requires_integer_index() {
        let err = decode_split_id("atomic-engine-trade-first").expect_err("must fail");
        assert!(matches!(err, CalendarError::InvalidTradeIndex { .. }));
    }

    #[test]
    fn unsplit_ids_round_trip_at_midday() {
        let id = encode_unsplit_id(at(2024, 1, 1, 3), "atomic", "oyster", 5).expect("ok");
        assert_eq!(id, "atomic-oyster-5-trades-1JAN24");

        let event = decode_unsplit_id(&id).expect("ok");
        assert_eq!(event.num_trades, 5);
        assert_eq!(event.start_date, at(2024, 1, 1, 12));
    }

    #[test]
    fn unsplit_id_requires_integer_count() {
        let err = decode_unsplit_id("atomic-oyster-five-trades-1JAN24").expect_err("must fail");
        assert!(matches!(err, CalendarError::InvalidTradeCount { .. }));
    }

    #[test]
    fn manual_ids_round_trip_at_expiry_hour() {
        let id = encode_manual_id("atomic", "deribit", at(2022, 7, 29, 8), DEFAULT_MANUAL_SYMBOL)
            .expect("ok");
        assert_eq!(id, "atomic-deribit-BTC-29JUL22");

        let event = decode_manual_id(&id).expect("ok");
        assert_eq!(event.symbol, "BTC");
        assert_eq!(event.maturity, at(2022, 7, 29, 8));
    }

    #[test]
    fn encoders_reject_segments_that_cannot_be_decoded() {
        let err = encode_split_id("atomic-labs", "engine", 1).expect_err("must fail");
        assert!(matches!(err, CalendarError::InvalidSegment { field: "provider", .. }));

        let err = encode_manual_id("atomic", "", at(2022, 7, 29, 8), "BTC").expect_err("fail");
        assert!(matches!(err, CalendarError::InvalidSegment { field: "source", .. }));
    }

    #[test]
    fn classifies_by_segment_count_and_marker() {
        let cases = [
            ("atomic-call_spread_v1-monthly-27JUN22-29JUL22", EventIdKind::Period),
            ("atomic-oyster-5-trades-1JAN24", EventIdKind::Unsplit),
            ("atomic-oyster-trade-84", EventIdKind::Split),
            ("atomic-deribit-BTC-29JUL22", EventIdKind::Manual),
        ];

        for (id, kind) in cases {
            assert_eq!(classify_event_id(id).expect("ok"), kind, "{id}");
            let parsed = EventId::parse(id).expect("ok");
            assert_eq!(parsed.kind(), kind);
            assert_eq!(parsed.to_string(), id);
        }

        let err = classify_event_id("atomic-oyster").expect_err("must fail");
        assert!(matches!(err, CalendarError::InvalidEventIdFormat { .. }));
    }

    #[test]
    fn measures_event_length() {
        assert_eq!(
            cso_length("atomic-engine-monthly-27JUN22-29JUL22").expect("ok"),
            CsoLength::FullMonth
        );
        assert_eq!(
            cso_length("atomic-engine-monthly-27JUN22-26AUG22").expect("ok"),
            CsoLength::TwoMonths
        );
        assert_eq!(
            cso_length("atomic-engine-monthly-14JUL23-28JUL23").expect("ok"),
            CsoLength::HalfMonth
        );
        assert_eq!(
            cso_length("atomic-engine-monthly-14JUL23-25AUG23").expect("ok"),
            CsoLength::OneAndAHalfMonths
        );
        assert!(is_half_month("atomic-engine-monthly-14JUL23-28JUL23").expect("ok"));
        assert!(!is_half_month("atomic-engine-monthly-27JUN22-29JUL22").expect("ok"));
    }
}
