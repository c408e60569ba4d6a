use std::fmt::{Display, Formatter};
use std::ops::{Add, Sub};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, Weekday};

use crate::CalendarError;

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Millisecond-resolution instant pinned to UTC.
///
/// Every calendar operation takes one of these as its notion of "now"; nothing
/// in the engine reads the system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcInstant(OffsetDateTime);

impl UtcInstant {
    /// Current wall-clock time truncated to milliseconds. Only callers at the
    /// edge of the system (the CLI) should use this.
    pub fn now() -> Self {
        Self::truncate(OffsetDateTime::now_utc())
    }

    pub fn from_unix_millis(millis: i64) -> Result<Self, CalendarError> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * NANOS_PER_MILLI)
            .map(Self)
            .map_err(|_| CalendarError::UnrepresentableTimestamp { millis })
    }

    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        let parsed = OffsetDateTime::parse(input.trim(), &Rfc3339).map_err(|_| {
            CalendarError::InvalidTimestamp {
                value: input.to_owned(),
            }
        })?;

        Self::from_offset_datetime(parsed).map_err(|_| CalendarError::InvalidTimestamp {
            value: input.to_owned(),
        })
    }

    /// Accepts only values already expressed in UTC; sub-millisecond precision
    /// is dropped.
    pub fn from_offset_datetime(value: OffsetDateTime) -> Result<Self, CalendarError> {
        if value.offset() != UtcOffset::UTC {
            return Err(CalendarError::InvalidTimestamp {
                value: value
                    .format(&Rfc3339)
                    .unwrap_or_else(|_| String::from("<unformattable>")),
            });
        }

        Ok(Self::truncate(value))
    }

    pub fn from_ymd_hms_milli(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    ) -> Result<Self, CalendarError> {
        let invalid = || CalendarError::InvalidCalendarDate { year, month, day };
        let month = Month::try_from(month).map_err(|_| invalid())?;
        let date = Date::from_calendar_date(year, month, day).map_err(|_| invalid())?;
        let time =
            Time::from_hms_milli(hour, minute, second, millisecond).map_err(|_| invalid())?;

        Ok(Self(PrimitiveDateTime::new(date, time).assume_utc()))
    }

    /// `date` at `hour`:00:00.000 UTC.
    pub fn at_hour(date: Date, hour: u8) -> Result<Self, CalendarError> {
        let time = Time::from_hms(hour, 0, 0).map_err(|_| CalendarError::InvalidCalendarDate {
            year: date.year(),
            month: u8::from(date.month()),
            day: date.day(),
        })?;

        Ok(Self(PrimitiveDateTime::new(date, time).assume_utc()))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn unix_millis(self) -> i64 {
        // Bounded by the representable date range, so the narrowing cannot truncate.
        (self.0.unix_timestamp_nanos() / NANOS_PER_MILLI) as i64
    }

    pub fn date(self) -> Date {
        self.0.date()
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// One-indexed month (1 = January).
    pub fn month(self) -> u8 {
        u8::from(self.0.month())
    }

    pub fn day(self) -> u8 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn hour(self) -> u8 {
        self.0.hour()
    }

    pub fn minute(self) -> u8 {
        self.0.minute()
    }

    pub fn second(self) -> u8 {
        self.0.second()
    }

    pub fn millisecond(self) -> u16 {
        self.0.millisecond()
    }

    /// `self + offset`, or `UnrepresentableTimestamp` when the result leaves
    /// the supported date range.
    pub fn checked_add(self, offset: Duration) -> Result<Self, CalendarError> {
        self.0
            .checked_add(offset)
            .map(Self)
            .ok_or_else(|| self.overflow(offset.whole_milliseconds()))
    }

    pub fn checked_sub(self, offset: Duration) -> Result<Self, CalendarError> {
        self.0
            .checked_sub(offset)
            .map(Self)
            .ok_or_else(|| self.overflow(-offset.whole_milliseconds()))
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| format!("{}ms", self.unix_millis()))
    }

    fn overflow(self, offset_millis: i128) -> CalendarError {
        let millis = i128::from(self.unix_millis()).saturating_add(offset_millis);
        CalendarError::UnrepresentableTimestamp {
            millis: millis.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64,
        }
    }

    fn truncate(value: OffsetDateTime) -> Self {
        let nanos = value.unix_timestamp_nanos();
        let truncated = nanos - nanos.rem_euclid(NANOS_PER_MILLI);
        Self(OffsetDateTime::from_unix_timestamp_nanos(truncated).unwrap_or(value))
    }
}

impl Add<Duration> for UtcInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub<Duration> for UtcInstant {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self(self.0 - rhs)
    }
}

impl Sub for UtcInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

impl Display for UtcInstant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcInstant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcInstant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
