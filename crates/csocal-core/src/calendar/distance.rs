use time::Duration;

use super::events::{current_phase, cycle_event_dates};
use super::maturity::previous_cycle_maturity;
use crate::{CalendarError, Phase, UtcInstant};

/// Default bound on the backward search in [`cycles_between`].
pub const DEFAULT_MAX_TRIES: u32 = 1000;

/// Cycle maturity `num_months` cycles before `t`.
///
/// `num_months == 1` is the maturity that opened the cycle in force just
/// before `t`.
pub fn months_before_maturity(t: UtcInstant, num_months: u32) -> Result<UtcInstant, CalendarError> {
    if num_months == 0 {
        return Err(CalendarError::ZeroMonths);
    }

    let mut maturity = t;
    for _ in 0..num_months {
        maturity = previous_cycle_maturity(maturity.checked_sub(Duration::milliseconds(1))?)?;
    }

    Ok(maturity)
}

/// Number of whole cycles between the cycle opened by `previous_expiry` and
/// the cycle containing `t`.
///
/// `previous_expiry` must lie before `t` and inside a `dlcExpiry` phase; it is
/// normalised to the maturity that opened its cycle. Returns 0 when `t` is
/// still in that cycle.
pub fn cycles_between(
    t: UtcInstant,
    previous_expiry: UtcInstant,
    max_tries: u32,
) -> Result<u32, CalendarError> {
    if previous_expiry >= t {
        return Err(CalendarError::ExpiryNotBeforeNow {
            previous_expiry,
            now: t,
        });
    }

    let phase = current_phase(previous_expiry)?;
    if phase != Phase::DlcExpiry {
        return Err(CalendarError::ExpiryOutsideDlcExpiry {
            previous_expiry,
            phase,
        });
    }

    let target = cycle_event_dates(previous_expiry)?.previous_dlc_expiry;
    let mut cursor = previous_cycle_maturity(t)?;
    if cursor == target {
        return Ok(0);
    }

    for step in 1..=max_tries {
        cursor = previous_cycle_maturity(cursor.checked_sub(Duration::milliseconds(1))?)?;
        if cursor == target {
            return Ok(step);
        }
    }

    Err(CalendarError::SearchExhausted { max_tries })
}
