//! bikeshare - Explore US bikeshare trip data
//!
//! This library provides functionality to:
//! - Load a city's trip file and filter it by month and day of week
//! - Compute temporal, station, duration and user statistics
//! - Page through raw rows five at a time
//! - Drive the interactive prompt session
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::{
//!     data_loader::DataLoader,
//!     output::get_formatter,
//!     statistics::compute_reports,
//!     CityKey, Month, TripFilter,
//! };
//!
//! fn main() -> bikeshare::Result<()> {
//!     let loader = DataLoader::new("data");
//!     let filter = TripFilter::new().with_month(Month::March);
//!
//!     let table = loader.load(CityKey::Chicago, &filter)?;
//!     let reports = compute_reports(&table, CityKey::Chicago);
//!     println!("{}", get_formatter(false).format_reports(CityKey::Chicago, &filter, &reports));
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod interactive;
pub mod pagination;
pub mod statistics;

// Re-export the workspace crates under their familiar module names
pub use bikeshare_core::{error, filters, report_types, source, table, types};
pub use bikeshare_data::{csv_source, data_loader};
pub use bikeshare_terminal::output;

// Re-export commonly used types
pub use error::{BikeshareError, Result};
pub use filters::TripFilter;
pub use table::{FilteredTable, Trip};
pub use types::{CityKey, DayOfWeek, Month, TripRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
