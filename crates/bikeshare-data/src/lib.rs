//! CSV data backend for bikeshare
//!
//! This crate reads the per-city trip files and implements `load`, which
//! turns a city and a filter into a [`FilteredTable`](bikeshare_core::FilteredTable).

pub mod csv_source;
pub mod data_loader;

pub use csv_source::CsvTripSource;
pub use data_loader::DataLoader;
