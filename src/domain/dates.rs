// src/domain/dates.rs
//
// Calendar dates as they travel between form, client and server.
//
// Form inputs and the API both speak plain calendar dates. They are parsed as
// `NaiveDate` and never go through a local-midnight timestamp, so the parsed
// value is always the date the user typed.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Datetimes without an offset, as sent by form widgets and some API versions.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses `YYYY-MM-DD`, or the date of a complete ISO datetime
/// (`2020-03-01T00:00:00.000Z`, `2020-03-01 10:00:00`).
///
/// The whole value must parse. With an offset, the date is the one written in
/// the value, not the date in UTC.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|datetime| datetime.date())
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// How dates typed into the edit form are turned into the dates sent on update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateNormalization {
    /// Sends the entered date plus one day. Records already on the server were
    /// written this way, so this keeps edits consistent with them.
    #[default]
    LegacyDayShift,
    /// Sends exactly the entered date.
    AsEntered,
}

impl DateNormalization {
    pub fn apply(self, date: NaiveDate) -> NaiveDate {
        match self {
            DateNormalization::LegacyDayShift => {
                date.checked_add_days(Days::new(1)).unwrap_or(date)
            }
            DateNormalization::AsEntered => date,
        }
    }

    /// Normalizes a raw form value. Values that are not dates are returned
    /// untouched so validation can report them.
    pub fn normalize_raw(self, raw: &str) -> String {
        match parse_calendar_date(raw) {
            Some(date) => format_calendar_date(self.apply(date)),
            None => raw.to_string(),
        }
    }
}

impl fmt::Display for DateNormalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateNormalization::LegacyDayShift => write!(f, "legacy-day-shift"),
            DateNormalization::AsEntered => write!(f, "as-entered"),
        }
    }
}

impl FromStr for DateNormalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "legacy-day-shift" => Ok(DateNormalization::LegacyDayShift),
            "as-entered" => Ok(DateNormalization::AsEntered),
            other => Err(format!("unknown date normalization '{}'", other)),
        }
    }
}

/// Serde adapter: writes `YYYY-MM-DD`, reads either a date or an ISO datetime.
pub mod calendar_date {
    use super::{format_calendar_date, parse_calendar_date};
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_calendar_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid calendar date '{}'", raw)))
    }
}
