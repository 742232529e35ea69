//! Report result types
//!
//! These types carry the output of the statistics engine. Every report can
//! describe an empty table: modes become [`Mode::NoData`] and undefined
//! aggregates become `None`, so no report ever has to fail.

use serde::Serialize;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::types::DayOfWeek;

/// Most frequent value(s) of a column
///
/// Ties are kept: every value sharing the top frequency is listed, in
/// ascending order.
///
/// # Examples
/// ```
/// use bikeshare_core::report_types::Mode;
///
/// let mode = Mode::from_values(["A", "B", "A", "B", "C"]);
/// assert_eq!(mode.values(), &["A", "B"]);
/// assert_eq!(mode.count(), Some(2));
///
/// let empty: Mode<u32> = Mode::from_values(Vec::new());
/// assert!(empty.is_no_data());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Mode<T> {
    /// The column had no values
    NoData,
    /// One or more values share the highest frequency
    Found {
        /// Tied values, ascending
        values: SmallVec<[T; 1]>,
        /// How often each of them occurs
        count: usize,
    },
}

impl<T: Eq + Hash + Ord> Mode<T> {
    /// Compute the mode of a sequence of values
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut counts: HashMap<T, usize> = HashMap::new();
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
        }
        Self::from_counts(counts)
    }

    /// Pick the most frequent keys from precomputed counts
    pub fn from_counts<C>(counts: C) -> Self
    where
        C: IntoIterator<Item = (T, usize)>,
    {
        let mut best = 0;
        let mut values: SmallVec<[T; 1]> = SmallVec::new();
        for (value, count) in counts {
            if count == 0 || count < best {
                continue;
            }
            if count > best {
                best = count;
                values.clear();
            }
            values.push(value);
        }

        if values.is_empty() {
            return Self::NoData;
        }
        values.sort_unstable();
        Self::Found {
            values,
            count: best,
        }
    }
}

impl<T> Mode<T> {
    /// Tied values; empty when there is no data
    pub fn values(&self) -> &[T] {
        match self {
            Self::NoData => &[],
            Self::Found { values, .. } => values,
        }
    }

    /// Frequency of the mode; `None` when there is no data
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::NoData => None,
            Self::Found { count, .. } => Some(*count),
        }
    }

    /// Whether the column had no values
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// Convert each tied value, keeping their order
    ///
    /// Used to turn borrowed keys into owned ones after counting; `f` should
    /// preserve ordering so the values stay ascending.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Mode<U> {
        match self {
            Self::NoData => Mode::NoData,
            Self::Found { values, count } => Mode::Found {
                values: values.into_iter().map(f).collect(),
                count,
            },
        }
    }
}

/// Most common travel times
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalReport {
    /// Most common calendar month number (1 = January)
    pub popular_month: Mode<u32>,
    /// Most common day of week
    pub popular_day: Mode<DayOfWeek>,
    /// Most common start hour (0-23)
    pub popular_hour: Mode<u32>,
}

/// Most popular stations and trips
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    /// Most common start station
    pub popular_start_station: Mode<String>,
    /// Most common end station
    pub popular_end_station: Mode<String>,
    /// Most common start and end station names joined with no separator
    ///
    /// Distinct pairs can collide here ("A" + "BC" == "AB" + "C");
    /// [`popular_route`](Self::popular_route) keeps them apart.
    pub popular_trip: Mode<String>,
    /// Most common (start, end) station pair
    pub popular_route: Mode<(String, String)>,
}

/// Total and average trip duration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationReport {
    /// Number of trips aggregated
    pub trip_count: usize,
    /// Sum of all trip durations in seconds
    pub total_seconds: f64,
    /// Mean trip duration in seconds; `None` for an empty table
    pub mean_seconds: Option<f64>,
}

/// Gender and birth-year statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Demographics {
    /// The city does not publish demographic data
    NotAvailable,
    /// Demographic breakdown
    Available {
        /// Trips per gender; empty cells are not counted
        gender_counts: BTreeMap<String, usize>,
        /// Most common birth year
        birth_year_mode: Mode<i32>,
        /// Most recent birth year; `None` without data
        birth_year_max: Option<i32>,
        /// Earliest birth year; `None` without data
        birth_year_min: Option<i32>,
    },
}

/// Rider statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReport {
    /// Trips per user type; empty cells are not counted
    pub user_type_counts: BTreeMap<String, usize>,
    /// Gender and birth-year statistics, when the city has them
    pub demographics: Demographics,
}

/// All four reports for one filtered table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reports {
    pub temporal: TemporalReport,
    pub station: StationReport,
    pub duration: DurationReport,
    pub user: UserReport,
}
