//! Statistics engine
//!
//! Four independent, read-only reports over a [`FilteredTable`]:
//!
//! - [`temporal_report`]: most common month, day of week and start hour
//! - [`station_report`]: most common start station, end station and trip
//! - [`duration_report`]: total and mean trip duration
//! - [`user_report`]: user-type counts plus gender and birth-year statistics
//!   for cities that publish them
//!
//! [`compute_reports`] runs all four on the rayon pool and gathers them.
//! Each report describes an empty table with explicit "no data" values
//! instead of failing.
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::{data_loader::DataLoader, statistics::compute_reports};
//! use bikeshare_core::{CityKey, TripFilter};
//!
//! # fn example() -> bikeshare::Result<()> {
//! let loader = DataLoader::new("data");
//! let table = loader.load(CityKey::Washington, &TripFilter::new())?;
//! let reports = compute_reports(&table, CityKey::Washington);
//! println!("{} trips", reports.duration.trip_count);
//! # Ok(())
//! # }
//! ```

use bikeshare_core::report_types::{
    Demographics, DurationReport, Mode, Reports, StationReport, TemporalReport, UserReport,
};
use bikeshare_core::table::{FilteredTable, Trip};
use bikeshare_core::types::CityKey;
use std::collections::BTreeMap;
use tracing::debug;

/// Most common month, day of week and start hour
pub fn temporal_report(table: &FilteredTable) -> TemporalReport {
    TemporalReport {
        popular_month: Mode::from_values(table.iter().map(Trip::month)),
        popular_day: Mode::from_values(table.iter().map(Trip::day_of_week)),
        popular_hour: Mode::from_values(table.iter().map(Trip::hour)),
    }
}

/// Most common start station, end station and station pair
///
/// `popular_trip` joins the two names with no separator, so two different
/// pairs can count as the same trip; `popular_route` keys on the pair itself.
pub fn station_report(table: &FilteredTable) -> StationReport {
    let starts = table.iter().map(|t| t.record().start_station.as_str());
    let ends = table.iter().map(|t| t.record().end_station.as_str());
    let joined = table
        .iter()
        .map(|t| format!("{}{}", t.record().start_station, t.record().end_station));
    let routes = table.iter().map(|t| {
        (
            t.record().start_station.as_str(),
            t.record().end_station.as_str(),
        )
    });

    StationReport {
        popular_start_station: Mode::from_values(starts).map(str::to_string),
        popular_end_station: Mode::from_values(ends).map(str::to_string),
        popular_trip: Mode::from_values(joined),
        popular_route: Mode::from_values(routes)
            .map(|(start, end)| (start.to_string(), end.to_string())),
    }
}

/// Total and mean trip duration in seconds
pub fn duration_report(table: &FilteredTable) -> DurationReport {
    let trip_count = table.len();
    let total_seconds: f64 = table.iter().map(|t| t.record().trip_duration).sum();
    let mean_seconds = (trip_count > 0).then(|| total_seconds / trip_count as f64);

    DurationReport {
        trip_count,
        total_seconds,
        mean_seconds,
    }
}

/// User-type counts, plus demographics when `city` publishes them
pub fn user_report(table: &FilteredTable, city: CityKey) -> UserReport {
    let user_type_counts = count_by(
        table
            .iter()
            .filter_map(|t| t.record().user_type.as_deref()),
    );

    let demographics = if city.has_demographics() {
        let birth_years: Vec<i32> = table.iter().filter_map(|t| t.record().birth_year).collect();
        Demographics::Available {
            gender_counts: count_by(table.iter().filter_map(|t| t.record().gender.as_deref())),
            birth_year_mode: Mode::from_values(birth_years.iter().copied()),
            birth_year_max: birth_years.iter().copied().max(),
            birth_year_min: birth_years.iter().copied().min(),
        }
    } else {
        Demographics::NotAvailable
    };

    UserReport {
        user_type_counts,
        demographics,
    }
}

/// Compute all four reports
///
/// The reports share nothing mutable, so they run in parallel and are
/// joined before returning.
pub fn compute_reports(table: &FilteredTable, city: CityKey) -> Reports {
    let ((temporal, station), (duration, user)) = rayon::join(
        || rayon::join(|| temporal_report(table), || station_report(table)),
        || rayon::join(|| duration_report(table), || user_report(table, city)),
    );

    debug!("Computed reports over {} {} trips", table.len(), city);
    Reports {
        temporal,
        station,
        duration,
        user,
    }
}

fn count_by<'a>(values: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}
