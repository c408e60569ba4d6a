use time::{Duration, Weekday};

use super::maturity::MATURITY_HOUR;
use crate::{CalendarError, UtcInstant};

const FRIDAY_FROM_SUNDAY: i64 = Weekday::Friday.number_days_from_sunday() as i64;

/// Friday 08:00 UTC of the Sunday-to-Saturday week containing `t`, or of the
/// following week once `t` is a Friday at or after 08:00.
///
/// On a Saturday this is the day before, since Saturday closes the week.
pub fn upcoming_friday(t: UtcInstant) -> Result<UtcInstant, CalendarError> {
    let mut day_delta = FRIDAY_FROM_SUNDAY - days_from_sunday(t);
    if day_delta == 0 && t.hour() >= MATURITY_HOUR {
        day_delta = 7;
    }

    UtcInstant::at_hour(t.checked_add(Duration::days(day_delta))?.date(), MATURITY_HOUR)
}

/// Most recent Friday 08:00 UTC before `t`, compared at whole-second
/// resolution: a Friday at exactly 08:00:00 still maps to the week before.
pub fn previous_friday(t: UtcInstant) -> Result<UtcInstant, CalendarError> {
    let mut day_delta = (FRIDAY_FROM_SUNDAY - days_from_sunday(t)).rem_euclid(7);
    let past_eight = t.hour() > MATURITY_HOUR
        || (t.hour() == MATURITY_HOUR && (t.minute() > 0 || t.second() > 0));
    if day_delta == 0 && past_eight {
        day_delta = 7;
    }

    UtcInstant::at_hour(t.checked_sub(Duration::days(7 - day_delta))?.date(), MATURITY_HOUR)
}

fn days_from_sunday(t: UtcInstant) -> i64 {
    i64::from(t.weekday().number_days_from_sunday())
}
