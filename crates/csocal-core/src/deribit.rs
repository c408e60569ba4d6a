//! Deribit-style date tokens and option instrument names.
//!
//! A date token is `<day><MON><YY>` in UTC with no zero padding on the day,
//! e.g. `14MAY22` or `1JAN19`. Event IDs embed these tokens, so the calendar
//! engine formats dates only through this module.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{CalendarError, UtcInstant};

/// Hour of day used when a token stands for an expiry.
pub const EXPIRY_HOUR: u8 = 8;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Parsed `<day><MON><YY>` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateToken {
    date: Date,
}

impl DateToken {
    pub fn from_instant(instant: UtcInstant) -> Self {
        Self {
            date: instant.date(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        let invalid = || CalendarError::InvalidDateToken {
            value: input.to_owned(),
        };

        let day_len = input.bytes().take_while(u8::is_ascii_digit).count();
        let rest = &input[day_len..];
        let month_len = rest.bytes().take_while(u8::is_ascii_uppercase).count();
        let (month_str, year_str) = rest.split_at(month_len);

        if !(1..=2).contains(&day_len)
            || !(1..=2).contains(&year_str.len())
            || !year_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let day = input[..day_len].parse::<u8>().map_err(|_| invalid())?;
        let two_digit_year = year_str.parse::<i32>().map_err(|_| invalid())?;
        let month_index = MONTH_ABBREVIATIONS
            .iter()
            .position(|abbr| *abbr == month_str)
            .ok_or_else(invalid)?;
        let month = Month::try_from(month_index as u8 + 1).map_err(|_| invalid())?;
        let date = Date::from_calendar_date(2000 + two_digit_year, month, day)
            .map_err(|_| invalid())?;

        Ok(Self { date })
    }

    pub fn date(self) -> Date {
        self.date
    }

    pub fn day(self) -> u8 {
        self.date.day()
    }

    /// The token's date at `hour`:00 UTC.
    pub fn at_hour(self, hour: u8) -> Result<UtcInstant, CalendarError> {
        UtcInstant::at_hour(self.date, hour)
    }
}

impl Display for DateToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let month = MONTH_ABBREVIATIONS[usize::from(u8::from(self.date.month())) - 1];
        write!(
            f,
            "{}{}{:02}",
            self.date.day(),
            month,
            self.date.year().rem_euclid(100)
        )
    }
}

impl FromStr for DateToken {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Formats `instant` as a Deribit date token, e.g. `14MAY22`.
pub fn format_date_token(instant: UtcInstant) -> String {
    DateToken::from_instant(instant).to_string()
}

/// Parses a Deribit date token.
pub fn parse_date_token(token: &str) -> Result<DateToken, CalendarError> {
    DateToken::parse(token)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub const fn symbol(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }
}

/// A BTC option as named on Deribit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionInstrument {
    pub expiry: UtcInstant,
    pub strike_price: u64,
    #[serde(rename = "type")]
    pub option_type: OptionType,
}

/// `BTC-<token>-<strike>-<C|P>`, e.g. `BTC-1JAN19-120000-C`.
pub fn compose_instrument_name(instrument: &OptionInstrument) -> String {
    format!(
        "BTC-{}-{}-{}",
        format_date_token(instrument.expiry),
        instrument.strike_price,
        instrument.option_type.symbol()
    )
}

/// Parses an option instrument name; the expiry is placed at 08:00 UTC.
pub fn parse_instrument_name(name: &str) -> Result<OptionInstrument, CalendarError> {
    let unsupported = || CalendarError::UnsupportedInstrument {
        value: name.to_owned(),
    };

    let mut parts = name.split('-').skip(1);
    let (Some(expiry), Some(strike), Some(type_symbol)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(unsupported());
    };

    let option_type = match type_symbol {
        "C" => OptionType::Call,
        "P" => OptionType::Put,
        _ => return Err(unsupported()),
    };
    let expiry = DateToken::parse(expiry)
        .and_then(|token| token.at_hour(EXPIRY_HOUR))
        .map_err(|_| unsupported())?;
    let strike_price = strike.parse::<u64>().map_err(|_| unsupported())?;

    Ok(OptionInstrument {
        expiry,
        strike_price,
        option_type,
    })
}
