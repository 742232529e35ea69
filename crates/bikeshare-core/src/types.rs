//! Core domain types for bikeshare
//!
//! This module contains the fundamental types used throughout the bikeshare
//! crates: the three supported cities, the month and day-of-week selectors,
//! and a single trip record as read from a city's data file.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BikeshareError, Result};

/// One of the three cities with trip data
///
/// Each city maps to exactly one data file name. Only Chicago and New York
/// City publish rider gender and birth year.
///
/// # Examples
/// ```
/// use bikeshare_core::types::CityKey;
/// use std::str::FromStr;
///
/// let city = CityKey::from_str("new york city").unwrap();
/// assert_eq!(city, CityKey::NewYorkCity);
/// assert_eq!(city.file_name(), "new_york_city.csv");
/// assert!(!CityKey::Washington.has_demographics());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityKey {
    Chicago,
    NewYorkCity,
    Washington,
}

impl CityKey {
    /// All cities, in prompt order
    pub const ALL: [CityKey; 3] = [Self::Chicago, Self::NewYorkCity, Self::Washington];

    /// Human-readable city name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chicago => "Chicago",
            Self::NewYorkCity => "New York City",
            Self::Washington => "Washington",
        }
    }

    /// Name of the city's data file inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Chicago => "chicago.csv",
            Self::NewYorkCity => "new_york_city.csv",
            Self::Washington => "washington.csv",
        }
    }

    /// Whether the city's data carries gender and birth-year columns
    pub fn has_demographics(&self) -> bool {
        !matches!(self, Self::Washington)
    }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CityKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "chicago" => Ok(Self::Chicago),
            "new york city" => Ok(Self::NewYorkCity),
            "washington" => Ok(Self::Washington),
            _ => Err(format!("Invalid city: {s}")),
        }
    }
}

/// Month selector for filtering
///
/// The data sets cover January through June only, so only those months can
/// be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
}

impl Month {
    /// All selectable months, in calendar order
    pub const ALL: [Month; 6] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
    ];

    /// Calendar month number (1 = January)
    pub fn number(&self) -> u32 {
        *self as u32
    }

    /// English month name
    pub fn name(&self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Invalid month: {s} (expected January to June)"))
    }
}

/// Day of the week, numbered 0 (Monday) to 6 (Sunday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl DayOfWeek {
    /// All days, Monday first
    pub const ALL: [DayOfWeek; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Index of the day, 0 = Monday
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Resolve a day index
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::InvalidSelector`] for anything above 6.
    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| BikeshareError::InvalidSelector(format!("day index {index}")))
    }

    /// English day name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        // num_days_from_monday is always 0..=6
        Self::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    /// Accepts a digit 0-6 or an English day name
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Ok(index) = wanted.parse::<u8>() {
            return Self::from_index(index).map_err(|e| e.to_string());
        }
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Invalid day of week: {s}"))
    }
}

/// A single trip as read from a city's data file
///
/// `gender` and `birth_year` are always `None` for cities without
/// demographic columns, and wherever the source cell is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Row identifier from the file's leading index column, if present
    pub id: Option<u64>,
    /// When the trip started
    pub start_time: NaiveDateTime,
    /// End time exactly as written in the file
    pub end_time: Option<String>,
    /// Trip length in seconds
    pub trip_duration: f64,
    /// Name of the station the trip started at
    pub start_station: String,
    /// Name of the station the trip ended at
    pub end_station: String,
    /// Rider category (e.g. Subscriber, Customer)
    pub user_type: Option<String>,
    /// Rider gender
    pub gender: Option<String>,
    /// Rider birth year
    pub birth_year: Option<i32>,
}

/// Timestamp layouts accepted in the start-time column
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a start-time cell
///
/// Returns `None` when the text matches none of the accepted layouts.
///
/// # Examples
/// ```
/// use bikeshare_core::types::parse_timestamp;
/// use chrono::{Datelike, Timelike};
///
/// let ts = parse_timestamp("2017-06-23 15:09:32").unwrap();
/// assert_eq!((ts.month(), ts.hour()), (6, 15));
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}
