use serde::Serialize;
use time::Duration;

use super::events::{cycle_event_dates, phase_within};
use crate::{CalendarError, Phase, UtcInstant};

/// Start and end of the window a new position can be entered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryWindow {
    pub start_date: UtcInstant,
    pub end_date: UtcInstant,
}

/// Window that can be entered into immediately at `t`.
///
/// Before the current cycle's entry close this is the current full month.
/// Between entry close and the half-month entry close it is the half-month
/// window. After that it is the next full cycle. With `force_extended` the
/// end moves one maturity further out, giving 1.5 or 2 month instruments.
pub fn entry_window(t: UtcInstant, force_extended: bool) -> Result<EntryWindow, CalendarError> {
    let dates = cycle_event_dates(t)?;
    let phase = phase_within(&dates, t)?;

    let (start_date, cycle_end) = match phase {
        Phase::HalfMonthEntryClosed | Phase::TradingOpenHalfMonth => {
            let next = cycle_event_dates(dates.upcoming_dlc_expiry + Duration::milliseconds(1))?;
            (next.new_entry_closed, next.upcoming_dlc_expiry)
        }
        Phase::NewEntryClosed | Phase::TradingOpen => {
            (dates.half_month_entry_closed, dates.upcoming_dlc_expiry)
        }
        Phase::DlcExpiry | Phase::DlcAttestation | Phase::RolloverOpen | Phase::NewEntryOpen => {
            (dates.new_entry_closed, dates.upcoming_dlc_expiry)
        }
    };

    let end_date = if force_extended {
        cycle_event_dates(cycle_end + Duration::milliseconds(1))?.upcoming_dlc_expiry
    } else {
        cycle_end
    };

    Ok(EntryWindow {
        start_date,
        end_date,
    })
}
