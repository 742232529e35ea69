//! Core types, traits, and utilities for bikeshare
//!
//! This crate provides the foundational types, error handling, trip
//! filters, and report result types used by all other bikeshare crates.

pub mod error;
pub mod filters;
pub mod report_types;
pub mod source;
pub mod table;
pub mod types;

// Re-export commonly used types
pub use error::{BikeshareError, InputCategory, Result};
pub use filters::TripFilter;
pub use table::{FilteredTable, Trip};
pub use types::{CityKey, DayOfWeek, Month, TripRecord};
