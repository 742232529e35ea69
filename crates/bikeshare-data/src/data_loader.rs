//! Data loader module
//!
//! The loader resolves a city to its records through a [`TripSource`],
//! derives month and day of week for each trip, and applies a
//! [`TripFilter`]. Row order from the source is preserved.
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare_core::{CityKey, Month, TripFilter};
//! use bikeshare_data::DataLoader;
//!
//! # fn example() -> bikeshare_core::Result<()> {
//! let loader = DataLoader::new("data");
//! let table = loader.load(CityKey::Chicago, &TripFilter::new().with_month(Month::March))?;
//! println!("{} trips in March", table.len());
//! # Ok(())
//! # }
//! ```

use bikeshare_core::error::Result;
use bikeshare_core::filters::TripFilter;
use bikeshare_core::source::TripSource;
use bikeshare_core::table::FilteredTable;
use bikeshare_core::types::CityKey;
use std::path::PathBuf;
use tracing::info;

use crate::csv_source::CsvTripSource;

/// Loads and filters trips for a city
pub struct DataLoader<S = CsvTripSource> {
    source: S,
}

impl DataLoader<CsvTripSource> {
    /// Create a loader reading CSV files from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: CsvTripSource::new(data_dir),
        }
    }

    /// Show a spinner while city files are read
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.source = self.source.with_progress(show_progress);
        self
    }
}

impl<S: TripSource> DataLoader<S> {
    /// Create a loader over any trip source
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Load `city` and keep only trips matching `filter`
    ///
    /// # Errors
    ///
    /// Propagates any error from the source: a missing file, a malformed
    /// row, or an unparseable start time.
    pub fn load(&self, city: CityKey, filter: &TripFilter) -> Result<FilteredTable> {
        let records = self.source.read_trips(city)?;
        let total = records.len();

        let table = filter.apply(FilteredTable::from_records(records));
        info!(
            "Loaded {} of {} {} trips ({})",
            table.len(),
            total,
            city,
            filter
        );
        Ok(table)
    }
}
