use time::{Date, Duration, Month, Weekday};

use crate::{CalendarError, UtcInstant};

/// Hour of day (UTC) at which every cycle matures.
pub const MATURITY_HOUR: u8 = 8;

/// Earliest plausible year for a millisecond timestamp; earlier values are
/// almost always seconds.
pub const MIN_CYCLE_YEAR: i32 = 2009;
/// Latest plausible year; later values are almost always microseconds.
pub const MAX_CYCLE_YEAR: i32 = 2100;

/// Last Friday of `month` (1 = January) at 08:00 UTC.
///
/// Months outside 1..=12 roll into neighbouring years.
pub fn last_friday_of_month(year: i32, month: i32) -> Result<UtcInstant, CalendarError> {
    let zero_based = month - 1;
    let year = year + zero_based.div_euclid(12);
    let month = (zero_based.rem_euclid(12) + 1) as u8;

    let last_day = last_day_of_month(year, month)?;
    let days_past_friday = (i64::from(last_day.weekday().number_days_from_monday())
        - i64::from(Weekday::Friday.number_days_from_monday()))
    .rem_euclid(7);
    let friday = last_day - Duration::days(days_past_friday);

    UtcInstant::at_hour(friday, MATURITY_HOUR)
}

/// Maturity that closes the cycle containing `t`.
///
/// At exactly a maturity instant the cycle has already rolled, so the
/// following month's maturity is returned.
pub fn current_cycle_maturity(t: UtcInstant) -> Result<UtcInstant, CalendarError> {
    ensure_plausible_year(t)?;

    let maturity = last_friday_of_month(t.year(), i32::from(t.month()))?;
    if t < maturity {
        return Ok(maturity);
    }

    last_friday_of_month(t.year(), i32::from(t.month()) + 1)
}

pub fn next_cycle_maturity(t: UtcInstant) -> Result<UtcInstant, CalendarError> {
    let current = current_cycle_maturity(t)?;
    current_cycle_maturity(current + Duration::milliseconds(1))
}

/// Maturity that opened the cycle containing `t`.
pub fn previous_cycle_maturity(t: UtcInstant) -> Result<UtcInstant, CalendarError> {
    let current = current_cycle_maturity(t)?;
    let stepped_back = one_month_earlier(current)? - Duration::days(14);
    current_cycle_maturity(stepped_back)
}

fn ensure_plausible_year(t: UtcInstant) -> Result<(), CalendarError> {
    let year = t.year();
    let suspected_unit = if year < MIN_CYCLE_YEAR {
        "seconds"
    } else if year > MAX_CYCLE_YEAR {
        "microseconds"
    } else {
        return Ok(());
    };

    Err(CalendarError::TimestampOutOfRange {
        millis: t.unix_millis(),
        year,
        suspected_unit,
    })
}

fn last_day_of_month(year: i32, month: u8) -> Result<Date, CalendarError> {
    let invalid = || CalendarError::InvalidCalendarDate {
        year,
        month,
        day: 1,
    };
    let (next_year, next_month) = if month == 12 {
        (year + 1, Month::January)
    } else {
        (year, Month::try_from(month + 1).map_err(|_| invalid())?)
    };

    Date::from_calendar_date(next_year, next_month, 1)
        .map_err(|_| invalid())?
        .previous_day()
        .ok_or_else(invalid)
}

/// Same day-of-month one month earlier, clamped to the shorter month.
fn one_month_earlier(t: UtcInstant) -> Result<UtcInstant, CalendarError> {
    let (year, month) = if t.month() == 1 {
        (t.year() - 1, 12)
    } else {
        (t.year(), t.month() - 1)
    };
    let day = t.day().min(last_day_of_month(year, month)?.day());

    UtcInstant::from_ymd_hms_milli(
        year,
        month,
        day,
        t.hour(),
        t.minute(),
        t.second(),
        t.millisecond(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u8, day: u8, hour: u8, millisecond: u16) -> UtcInstant {
        UtcInstant::from_ymd_hms_milli(year, month, day, hour, 0, 0, millisecond)
            .expect("valid instant")
    }

    #[test]
    fn finds_last_friday_for_every_month_of_2022() {
        let expected_days = [28, 25, 25, 29, 27, 24, 29, 26, 30, 28, 25, 30];

        for (index, day) in expected_days.into_iter().enumerate() {
            let month = index as u8 + 1;
            let friday = last_friday_of_month(2022, i32::from(month)).expect("valid month");
            assert_eq!(friday, at(2022, month, day, 8, 0), "month {month}");
        }
    }

    #[test]
    fn last_friday_is_always_friday_at_eight() {
        for year in 2009..=2100 {
            for month in 1..=12 {
                let friday = last_friday_of_month(year, month).expect("valid month");
                assert_eq!(friday.weekday(), Weekday::Friday);
                assert_eq!(
                    (friday.hour(), friday.minute(), friday.second(), friday.millisecond()),
                    (8, 0, 0, 0)
                );
                assert!(friday.day() >= 22);
            }
        }
    }

    #[test]
    fn month_thirteen_rolls_into_next_year() {
        let rolled = last_friday_of_month(2022, 13).expect("valid");
        assert_eq!(rolled, at(2023, 1, 27, 8, 0));
    }

    #[test]
    fn current_maturity_mid_year() {
        let maturity = at(2022, 6, 24, 8, 0);
        let next = at(2022, 7, 29, 8, 0);

        assert_eq!(current_cycle_maturity(at(2022, 6, 23, 8, 0)).expect("ok"), maturity);
        assert_eq!(current_cycle_maturity(at(2022, 6, 24, 7, 999)).expect("ok"), maturity);
        assert_eq!(current_cycle_maturity(maturity).expect("ok"), next);
        assert_eq!(current_cycle_maturity(at(2022, 6, 24, 8, 1)).expect("ok"), next);
        assert_eq!(current_cycle_maturity(at(2022, 7, 1, 8, 0)).expect("ok"), next);
    }

    #[test]
    fn current_maturity_rolls_over_year_end() {
        let maturity = at(2022, 12, 30, 8, 0);
        let next = at(2023, 1, 27, 8, 0);

        assert_eq!(current_cycle_maturity(at(2022, 12, 29, 8, 0)).expect("ok"), maturity);
        assert_eq!(current_cycle_maturity(at(2022, 12, 30, 8, 1)).expect("ok"), next);
        assert_eq!(current_cycle_maturity(at(2022, 12, 31, 8, 0)).expect("ok"), next);
        assert_eq!(current_cycle_maturity(at(2023, 1, 6, 8, 0)).expect("ok"), next);
    }

    #[test]
    fn next_maturity_looks_one_cycle_ahead() {
        assert_eq!(
            next_cycle_maturity(at(2022, 6, 23, 8, 0)).expect("ok"),
            at(2022, 7, 29, 8, 0)
        );
        assert_eq!(
            next_cycle_maturity(at(2022, 6, 24, 8, 1)).expect("ok"),
            at(2022, 8, 26, 8, 0)
        );
        assert_eq!(
            next_cycle_maturity(at(2022, 12, 31, 8, 0)).expect("ok"),
            at(2023, 2, 24, 8, 0)
        );
    }

    #[test]
    fn previous_maturity_lands_on_prior_month() {
        assert_eq!(
            previous_cycle_maturity(at(2022, 6, 23, 8, 0)).expect("ok"),
            at(2022, 5, 27, 8, 0)
        );
        assert_eq!(
            previous_cycle_maturity(at(2022, 6, 24, 8, 0)).expect("ok"),
            at(2022, 6, 24, 8, 0)
        );
        assert_eq!(
            previous_cycle_maturity(at(2022, 7, 1, 8, 0)).expect("ok"),
            at(2022, 6, 24, 8, 0)
        );
        assert_eq!(
            previous_cycle_maturity(at(2022, 12, 29, 8, 0)).expect("ok"),
            at(2022, 11, 25, 8, 0)
        );
        // March 31st maturity stepping back into a 28-day February.
        assert_eq!(
            previous_cycle_maturity(at(2023, 4, 1, 0, 0)).expect("ok"),
            at(2023, 3, 31, 8, 0)
        );
    }

    #[test]
    fn rejects_timestamps_in_the_wrong_unit() {
        let seconds = UtcInstant::from_unix_millis(1_656_057_600).expect("representable");
        let err = current_cycle_maturity(seconds).expect_err("must fail");
        assert!(matches!(
            err,
            CalendarError::TimestampOutOfRange {
                suspected_unit: "seconds",
                ..
            }
        ));

        let micros = UtcInstant::from_unix_millis(1_656_057_600_000_000).expect("representable");
        let err = current_cycle_maturity(micros).expect_err("must fail");
        assert!(err.to_string().contains("microseconds"));
    }
}
