//! Minutes until a strategy's next entry window opens or closes.
//!
//! Strategy times are minute offsets from 00:00 UTC of the configured
//! weekday. When the computed event is not in the future it is pushed one
//! week out.

use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;

use serde::Serialize;

use crate::{CalendarError, DayOfWeek, Recurring, StrategySchedule, UtcInstant};

/// Minutes in one week.
pub const TIME_MINUTES_7_DAYS: i64 = 7 * 24 * 60;

const MILLIS_PER_MINUTE: i64 = 60 * 1000;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyEvent {
    Start,
    End,
}

impl StrategyEvent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl Display for StrategyEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Days from `t`'s weekday forward to `day_of_week`, in `0..=6`.
///
/// `None` and `Everyday` count as today.
pub fn days_until(t: UtcInstant, day_of_week: DayOfWeek) -> i64 {
    let Some(target) = day_of_week.weekday() else {
        return 0;
    };

    let diff = i64::from(target.number_days_from_sunday())
        - i64::from(t.weekday().number_days_from_sunday());
    diff.rem_euclid(7)
}

/// Minutes from `t` until 00:00 UTC `num_days` days later. Seconds are
/// ignored.
pub fn minutes_until(t: UtcInstant, num_days: i64) -> i64 {
    num_days
        .saturating_mul(24 * 60)
        .saturating_sub(i64::from(t.minute()) + i64::from(t.hour()) * 60)
}

/// Rounds `t` up to the next multiple of `x` hours since the epoch. Instants
/// already on a multiple are returned unchanged.
pub fn round_to_x_hour(t: UtcInstant, x: NonZeroU32) -> Result<UtcInstant, CalendarError> {
    let step = i64::from(x.get()) * MILLIS_PER_HOUR;
    let millis = t.unix_millis();
    let mut steps = millis.div_euclid(step);
    if millis.rem_euclid(step) != 0 {
        steps += 1;
    }

    UtcInstant::from_unix_millis(steps * step)
}

/// Minutes from `t` until the strategy's next start or end.
///
/// Hourly strategies end at the top of the next hour regardless of `endAt`,
/// which can give a fractional result.
pub fn minutes_until_strategy_event(
    t: UtcInstant,
    schedule: &StrategySchedule,
    event: StrategyEvent,
) -> Result<f64, CalendarError> {
    let conditions = &schedule.entry_conditions;

    if event == StrategyEvent::End && conditions.recurring == Recurring::Hourly {
        let next_hour = round_to_x_hour(t, NonZeroU32::MIN)?;
        let millis = (next_hour - t).whole_milliseconds();
        return Ok(millis as f64 / MILLIS_PER_MINUTE as f64);
    }

    let days = conditions
        .day_of_week
        .map_or(0, |day_of_week| days_until(t, day_of_week));
    let offset = match event {
        StrategyEvent::Start => conditions.start_at,
        StrategyEvent::End => conditions.end_at,
    };

    let mut minutes = minutes_until(t, days)
        .checked_add(offset)
        .ok_or(CalendarError::ScheduleOffsetOutOfRange { offset })?;
    if minutes <= 0 {
        minutes += TIME_MINUTES_7_DAYS;
    }

    Ok(minutes as f64)
}

pub fn minutes_until_strategy_start(
    t: UtcInstant,
    schedule: &StrategySchedule,
) -> Result<f64, CalendarError> {
    minutes_until_strategy_event(t, schedule, StrategyEvent::Start)
}

pub fn minutes_until_strategy_end(
    t: UtcInstant,
    schedule: &StrategySchedule,
) -> Result<f64, CalendarError> {
    minutes_until_strategy_event(t, schedule, StrategyEvent::End)
}
