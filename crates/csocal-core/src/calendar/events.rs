use serde::Serialize;
use time::Duration;

use super::maturity::{current_cycle_maturity, previous_cycle_maturity};
use crate::{CalendarError, Phase, UtcInstant};

/// Hours from a maturity until its oracle attestation.
pub const DLC_EXPIRY_LEN: i64 = 7;
/// Hours from attestation until rollover opens.
pub const DLC_ATTESTATION_LEN: i64 = 1;
/// Hours rollover stays open before new entries are accepted.
pub const ROLLOVER_OPEN_LEN: i64 = 24;
/// Hours new entries are accepted.
pub const NEW_ENTRY_OPEN_LEN: i64 = 36;
/// Hours between entry close and trading open.
pub const NEW_ENTRY_CLOSED_LEN: i64 = 8;
/// Hours between the half-month entry close and half-month trading open.
pub const HALF_MONTH_ENTRY_CLOSED_LEN: i64 = 6;
/// Hours from half-month trading open until the upcoming maturity.
pub const TRADING_OPEN_HALF_MONTH_LEN: i64 = 334;

/// Boundaries of one cycle, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleEventDates {
    pub previous_dlc_expiry: UtcInstant,
    pub dlc_attestation: UtcInstant,
    pub rollover_open: UtcInstant,
    pub new_entry_open: UtcInstant,
    pub new_entry_closed: UtcInstant,
    pub trading_open: UtcInstant,
    pub half_month_entry_closed: UtcInstant,
    pub trading_open_half_month: UtcInstant,
    pub upcoming_dlc_expiry: UtcInstant,
}

impl CycleEventDates {
    /// Instant at which `phase` begins in this cycle.
    pub fn phase_start(&self, phase: Phase) -> UtcInstant {
        match phase {
            Phase::DlcExpiry => self.previous_dlc_expiry,
            Phase::DlcAttestation => self.dlc_attestation,
            Phase::RolloverOpen => self.rollover_open,
            Phase::NewEntryOpen => self.new_entry_open,
            Phase::NewEntryClosed => self.new_entry_closed,
            Phase::TradingOpen => self.trading_open,
            Phase::HalfMonthEntryClosed => self.half_month_entry_closed,
            Phase::TradingOpenHalfMonth => self.trading_open_half_month,
        }
    }

    /// Half-open `[start, end)` span of each phase, in order.
    pub fn phase_ranges(&self) -> [(Phase, UtcInstant, UtcInstant); 8] {
        [
            (Phase::DlcExpiry, self.previous_dlc_expiry, self.dlc_attestation),
            (Phase::DlcAttestation, self.dlc_attestation, self.rollover_open),
            (Phase::RolloverOpen, self.rollover_open, self.new_entry_open),
            (Phase::NewEntryOpen, self.new_entry_open, self.new_entry_closed),
            (Phase::NewEntryClosed, self.new_entry_closed, self.trading_open),
            (Phase::TradingOpen, self.trading_open, self.half_month_entry_closed),
            (
                Phase::HalfMonthEntryClosed,
                self.half_month_entry_closed,
                self.trading_open_half_month,
            ),
            (
                Phase::TradingOpenHalfMonth,
                self.trading_open_half_month,
                self.upcoming_dlc_expiry,
            ),
        ]
    }
}

pub fn cycle_event_dates(t: UtcInstant) -> Result<CycleEventDates, CalendarError> {
    let upcoming_dlc_expiry = current_cycle_maturity(t)?;
    let previous_dlc_expiry = previous_cycle_maturity(t)?;

    let dlc_attestation = previous_dlc_expiry + Duration::hours(DLC_EXPIRY_LEN);
    let rollover_open = dlc_attestation + Duration::hours(DLC_ATTESTATION_LEN);
    let new_entry_open = rollover_open + Duration::hours(ROLLOVER_OPEN_LEN);
    let new_entry_closed = new_entry_open + Duration::hours(NEW_ENTRY_OPEN_LEN);
    let trading_open = new_entry_closed + Duration::hours(NEW_ENTRY_CLOSED_LEN);

    let trading_open_half_month =
        upcoming_dlc_expiry - Duration::hours(TRADING_OPEN_HALF_MONTH_LEN);
    let half_month_entry_closed =
        trading_open_half_month - Duration::hours(HALF_MONTH_ENTRY_CLOSED_LEN);

    Ok(CycleEventDates {
        previous_dlc_expiry,
        dlc_attestation,
        rollover_open,
        new_entry_open,
        new_entry_closed,
        trading_open,
        half_month_entry_closed,
        trading_open_half_month,
        upcoming_dlc_expiry,
    })
}

/// Phase of the cycle that `t` falls in.
pub fn current_phase(t: UtcInstant) -> Result<Phase, CalendarError> {
    phase_within(&cycle_event_dates(t)?, t)
}

pub(crate) fn phase_within(dates: &CycleEventDates, t: UtcInstant) -> Result<Phase, CalendarError> {
    if let Some((phase, _, _)) = dates
        .phase_ranges()
        .into_iter()
        .find(|(_, start, end)| *start <= t && t < *end)
    {
        return Ok(phase);
    }

    if t == dates.upcoming_dlc_expiry {
        return Ok(Phase::DlcExpiry);
    }

    Err(CalendarError::PhaseUnresolved { instant: t })
}
