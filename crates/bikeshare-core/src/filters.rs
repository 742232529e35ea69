//! Filtering module for trips
//!
//! This module provides month and day-of-week filtering for trip tables.
//! Both selectors are optional; an absent selector lets every trip through,
//! and a trip must match every present selector.
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::filters::TripFilter;
//! use bikeshare_core::types::{DayOfWeek, Month};
//!
//! // Mondays in March
//! let filter = TripFilter::new()
//!     .with_month(Month::March)
//!     .with_day(DayOfWeek::Monday);
//! assert!(!filter.is_unfiltered());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::table::{FilteredTable, Trip};
use crate::types::{DayOfWeek, Month};

/// Filter configuration for trips
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripFilter {
    /// Month selector, `None` for all months
    pub month: Option<Month>,
    /// Day-of-week selector, `None` for all days
    pub day: Option<DayOfWeek>,
}

impl TripFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from optional selectors
    pub fn from_selectors(month: Option<Month>, day: Option<DayOfWeek>) -> Self {
        Self { month, day }
    }

    /// Set the month filter
    pub fn with_month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the day-of-week filter
    pub fn with_day(mut self, day: DayOfWeek) -> Self {
        self.day = Some(day);
        self
    }

    /// Whether neither selector is set
    pub fn is_unfiltered(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }

    /// Check if a trip passes the filter
    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some(month) = self.month {
            if trip.month() != month.number() {
                return false;
            }
        }

        if let Some(day) = self.day {
            if trip.day_of_week() != day {
                return false;
            }
        }

        true
    }

    /// Apply the filter to a table, keeping original relative order
    pub fn apply(&self, table: FilteredTable) -> FilteredTable {
        if self.is_unfiltered() {
            return table;
        }
        let before = table.len();
        let filtered = table.retain(|trip| self.matches(trip));
        tracing::debug!("Filter ({}) kept {} of {} trips", self, filtered.len(), before);
        filtered
    }
}

impl fmt::Display for TripFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map_or("all months", |m| m.name());
        let day = self.day.map_or("all days", |d| d.name());
        write!(f, "{month}, {day}")
    }
}
