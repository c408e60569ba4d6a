use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CalendarError;

/// Named sub-interval of a cycle, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    DlcExpiry,
    DlcAttestation,
    RolloverOpen,
    NewEntryOpen,
    NewEntryClosed,
    TradingOpen,
    HalfMonthEntryClosed,
    TradingOpenHalfMonth,
}

impl Phase {
    pub const ALL: [Self; 8] = [
        Self::DlcExpiry,
        Self::DlcAttestation,
        Self::RolloverOpen,
        Self::NewEntryOpen,
        Self::NewEntryClosed,
        Self::TradingOpen,
        Self::HalfMonthEntryClosed,
        Self::TradingOpenHalfMonth,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DlcExpiry => "dlcExpiry",
            Self::DlcAttestation => "dlcAttestation",
            Self::RolloverOpen => "rolloverOpen",
            Self::NewEntryOpen => "newEntryOpen",
            Self::NewEntryClosed => "newEntryClosed",
            Self::TradingOpen => "tradingOpen",
            Self::HalfMonthEntryClosed => "halfMonthEntryClosed",
            Self::TradingOpenHalfMonth => "tradingOpenHalfMonth",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CalendarError::InvalidPhase {
                value: trimmed.to_owned(),
            })
    }
}

/// Cadence label carried in period event IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsoPeriod {
    Weekly,
    Monthly,
    Bimonthly,
}

impl CsoPeriod {
    pub const ALL: [Self; 3] = [Self::Weekly, Self::Monthly, Self::Bimonthly];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Bimonthly => "bimonthly",
        }
    }
}

impl Display for CsoPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CsoPeriod {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "bimonthly" => Ok(Self::Bimonthly),
            other => Err(CalendarError::InvalidPeriod {
                value: other.to_owned(),
            }),
        }
    }
}

/// Span covered by a period event, from its decoded start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CsoLength {
    FullMonth,
    HalfMonth,
    OneAndAHalfMonths,
    TwoMonths,
}

impl CsoLength {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullMonth => "full-month",
            Self::HalfMonth => "half-month",
            Self::OneAndAHalfMonths => "one-and-a-half-months",
            Self::TwoMonths => "two-months",
        }
    }
}

impl Display for CsoLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
