//! Trip source trait
//!
//! This module defines the `TripSource` trait that data backends implement.
//! The loader reads all records for a city through it, then derives calendar
//! fields and applies filters itself.

use crate::error::Result;
use crate::types::{CityKey, TripRecord};

/// A backend that can produce every trip record for a city.
pub trait TripSource {
    /// Read all records for `city` in source order.
    ///
    /// Fails if the city's data is missing or malformed; a single bad row
    /// fails the whole read.
    fn read_trips(&self, city: CityKey) -> Result<Vec<TripRecord>>;
}

impl<S: TripSource + ?Sized> TripSource for &S {
    fn read_trips(&self, city: CityKey) -> Result<Vec<TripRecord>> {
        (**self).read_trips(city)
    }
}
