use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use crate::errors::ConfigError;

/// The time zone in which forecast timestamps are resolved and "today" is evaluated.
///
/// Naive timestamps from the forecast file are taken as wall-clock time in this zone,
/// timestamps carrying their own offset are converted into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl Zone {
    /// Interprets a naive date time as wall-clock time in the zone
    ///
    /// Returns None if the time doesn't exist in the zone (i.e. falls in a DST gap).
    /// An ambiguous time resolves to the earliest instant.
    ///
    /// # Arguments
    ///
    /// * 'naive' - the naive date time to localize
    pub fn localize(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Zone::Local => Local.from_local_datetime(naive).earliest().map(|d| d.fixed_offset()),
            Zone::Utc => Some(Utc.from_utc_datetime(naive).fixed_offset()),
            Zone::Fixed(offset) => offset.from_local_datetime(naive).earliest(),
        }
    }

    /// Converts a date time with any offset into the zone
    ///
    /// # Arguments
    ///
    /// * 'date_time' - the date time to convert
    pub fn convert(&self, date_time: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            Zone::Local => date_time.with_timezone(&Local).fixed_offset(),
            Zone::Utc => date_time.with_timezone(&Utc).fixed_offset(),
            Zone::Fixed(offset) => date_time.with_timezone(offset),
        }
    }

    /// Returns the current calendar date in the zone
    ///
    pub fn today(&self) -> NaiveDate {
        self.convert(Utc::now().fixed_offset()).date_naive()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Zone::Local => write!(f, "local ({})", Local::now().offset().fix()),
            Zone::Utc => write!(f, "utc"),
            Zone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl FromStr for Zone {
    type Err = ConfigError;

    /// Parses "local", "utc"/"z" or a fixed offset such as "+01:00", "-0530" or "+02"
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "local" => return Ok(Zone::Local),
            "utc" | "z" => return Ok(Zone::Utc),
            _ => {}
        }

        let (sign, digits) = match s.chars().next() {
            Some('+') => (1, &s[1..]),
            Some('-') => (-1, &s[1..]),
            _ => return Err(ConfigError(format!("invalid time zone: {}", s))),
        };

        if !digits.is_ascii() {
            return Err(ConfigError(format!("invalid time zone offset: {}", s)));
        }

        // Only HH, HHMM and HH:MM
        let (hh, mm) = match digits.len() {
            2 => (digits, "00"),
            4 => (&digits[0..2], &digits[2..4]),
            5 if digits.as_bytes()[2] == b':' => (&digits[0..2], &digits[3..5]),
            _ => return Err(ConfigError(format!("invalid time zone offset: {}", s))),
        };
        if !hh.chars().chain(mm.chars()).all(|c| c.is_ascii_digit()) {
            return Err(ConfigError(format!("invalid time zone offset: {}", s)));
        }

        let hours: i32 = hh.parse().map_err(|_| ConfigError(format!("invalid offset hours: {}", s)))?;
        let minutes: i32 = mm.parse().map_err(|_| ConfigError(format!("invalid offset minutes: {}", s)))?;
        if minutes >= 60 {
            return Err(ConfigError(format!("invalid offset minutes: {}", s)));
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Zone::Fixed)
            .ok_or_else(|| ConfigError(format!("time zone offset out of range: {}", s)))
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<Zone>().map_err(serde::de::Error::custom)
    }
}
