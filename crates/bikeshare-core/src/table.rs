//! In-memory trip table
//!
//! A [`FilteredTable`] is an ordered, immutable sequence of [`Trip`]s. Each
//! trip pairs a [`TripRecord`] with the calendar fields derived from its
//! start time once, at construction.

use chrono::{Datelike, Timelike};
use serde::Serialize;

use crate::types::{DayOfWeek, TripRecord};

/// A trip record plus its derived calendar fields
///
/// The derived fields are private and computed from `start_time` in
/// [`Trip::new`], so they can never disagree with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    #[serde(flatten)]
    record: TripRecord,
    month: u32,
    day_of_week: DayOfWeek,
}

impl Trip {
    /// Derive calendar fields for a record
    pub fn new(record: TripRecord) -> Self {
        let month = record.start_time.month();
        let day_of_week = DayOfWeek::from(record.start_time.weekday());
        Self {
            record,
            month,
            day_of_week,
        }
    }

    /// The underlying record
    pub fn record(&self) -> &TripRecord {
        &self.record
    }

    /// Calendar month of the start time (1 = January)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day of week of the start time
    pub fn day_of_week(&self) -> DayOfWeek {
        self.day_of_week
    }

    /// Hour of day of the start time (0-23)
    pub fn hour(&self) -> u32 {
        self.record.start_time.hour()
    }
}

/// Ordered trips for one city after filtering
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilteredTable {
    trips: Vec<Trip>,
}

impl FilteredTable {
    /// Wrap already-derived trips, keeping their order
    pub fn new(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    /// Derive calendar fields for every record, keeping file order
    pub fn from_records(records: Vec<TripRecord>) -> Self {
        Self::new(records.into_iter().map(Trip::new).collect())
    }

    /// All trips in order
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Iterate trips in order
    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    /// Number of trips
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the table has no trips
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Keep only trips matching the predicate, preserving order
    pub fn retain<F>(mut self, predicate: F) -> Self
    where
        F: FnMut(&Trip) -> bool,
    {
        self.trips.retain(predicate);
        self
    }
}

impl<'a> IntoIterator for &'a FilteredTable {
    type Item = &'a Trip;
    type IntoIter = std::slice::Iter<'a, Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.trips.iter()
    }
}
