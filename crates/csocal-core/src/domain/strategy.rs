use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::Weekday;

use crate::CalendarError;

/// How often a strategy re-enters the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurring {
    Monthly,
    Weekly,
    Daily,
    Hourly,
}

/// Day a strategy runs on, using the platform's numeric encoding
/// (`-1` none, `0` Sunday through `6` Saturday, `7` every day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum DayOfWeek {
    None,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Everyday,
}

impl DayOfWeek {
    pub const fn code(self) -> i8 {
        match self {
            Self::None => -1,
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
            Self::Everyday => 7,
        }
    }

    /// The concrete weekday, if this is one.
    pub const fn weekday(self) -> Option<Weekday> {
        match self {
            Self::Sunday => Some(Weekday::Sunday),
            Self::Monday => Some(Weekday::Monday),
            Self::Tuesday => Some(Weekday::Tuesday),
            Self::Wednesday => Some(Weekday::Wednesday),
            Self::Thursday => Some(Weekday::Thursday),
            Self::Friday => Some(Weekday::Friday),
            Self::Saturday => Some(Weekday::Saturday),
            Self::None | Self::Everyday => None,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sunday => Self::Sunday,
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
        }
    }
}

impl TryFrom<i8> for DayOfWeek {
    type Error = CalendarError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::None),
            0 => Ok(Self::Sunday),
            1 => Ok(Self::Monday),
            2 => Ok(Self::Tuesday),
            3 => Ok(Self::Wednesday),
            4 => Ok(Self::Thursday),
            5 => Ok(Self::Friday),
            6 => Ok(Self::Saturday),
            7 => Ok(Self::Everyday),
            other => Err(CalendarError::InvalidDayOfWeek { value: other }),
        }
    }
}

impl From<DayOfWeek> for i8 {
    fn from(value: DayOfWeek) -> Self {
        value.code()
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Entry window of a strategy. `start_at`/`end_at` are minutes from 00:00 UTC
/// of `day_of_week`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryConditions {
    pub start_at: i64,
    pub end_at: i64,
    pub recurring: Recurring,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
}

/// The part of a strategy record needed to schedule its next start or end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySchedule {
    pub entry_conditions: EntryConditions,
}

impl StrategySchedule {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

fn default_interval() -> u32 {
    1
}
