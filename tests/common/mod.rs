//! Common test utilities and helpers for bikeshare tests
//!
//! This module provides a trip builder, CSV fixture writers backed by
//! `tempfile`, and an in-memory trip source.

#![allow(dead_code)]

use bikeshare::{
    BikeshareError, CityKey, FilteredTable, Result, TripRecord, source::TripSource,
    types::parse_timestamp,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use tempfile::TempDir;

/// Common station names used across tests
pub const TEST_STATIONS: &[&str] = &[
    "Streeter Dr & Grand Ave",
    "Lake Shore Dr & Monroe St",
    "Clinton St & Washington Blvd",
    "Canal St & Adams St",
];

/// Builder for creating test TripRecord instances
pub struct TripRecordBuilder {
    id: Option<u64>,
    start_time: String,
    trip_duration: f64,
    start_station: String,
    end_station: String,
    user_type: Option<String>,
    gender: Option<String>,
    birth_year: Option<i32>,
}

impl TripRecordBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            id: None,
            // A Monday
            start_time: "2017-01-02 09:07:57".to_string(),
            trip_duration: 600.0,
            start_station: TEST_STATIONS[0].to_string(),
            end_station: TEST_STATIONS[1].to_string(),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_start_time(mut self, start_time: &str) -> Self {
        self.start_time = start_time.to_string();
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.trip_duration = seconds;
        self
    }

    pub fn with_stations(mut self, start: &str, end: &str) -> Self {
        self.start_station = start.to_string();
        self.end_station = end.to_string();
        self
    }

    pub fn with_user_type(mut self, user_type: Option<&str>) -> Self {
        self.user_type = user_type.map(str::to_string);
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.to_string());
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn build(self) -> TripRecord {
        TripRecord {
            id: self.id,
            start_time: parse_timestamp(&self.start_time).expect("valid test timestamp"),
            end_time: None,
            trip_duration: self.trip_duration,
            start_station: self.start_station,
            end_station: self.end_station,
            user_type: self.user_type,
            gender: self.gender,
            birth_year: self.birth_year,
        }
    }
}

impl Default for TripRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One trip per month from January to June, all at 08:00 on the 1st
pub fn half_year_table() -> FilteredTable {
    let records = (1..=6)
        .map(|month| {
            TripRecordBuilder::new()
                .with_id(month)
                .with_start_time(&format!("2017-{month:02}-01 08:00:00"))
                .build()
        })
        .collect();
    FilteredTable::from_records(records)
}

/// Directory holding generated city CSV files
pub struct CsvFixture {
    dir: TempDir,
}

impl CsvFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Write `records` in the column layout the city's real file uses
    pub fn write_city(&self, city: CityKey, records: &[TripRecord]) {
        let mut csv = String::new();
        if city.has_demographics() {
            csv.push_str(
                ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year\n",
            );
        } else {
            csv.push_str(",Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n");
        }

        for (i, record) in records.iter().enumerate() {
            let start = record.start_time.format("%Y-%m-%d %H:%M:%S");
            write!(
                csv,
                "{},{},{},{},\"{}\",\"{}\",{}",
                record.id.unwrap_or(i as u64),
                start,
                start,
                record.trip_duration,
                record.start_station,
                record.end_station,
                record.user_type.as_deref().unwrap_or(""),
            )
            .unwrap();
            if city.has_demographics() {
                write!(
                    csv,
                    ",{},{}",
                    record.gender.as_deref().unwrap_or(""),
                    // Birth years are floats in the real files
                    record
                        .birth_year
                        .map(|y| format!("{y}.0"))
                        .unwrap_or_default(),
                )
                .unwrap();
            }
            csv.push('\n');
        }

        self.write_raw(city, &csv);
    }

    /// Write arbitrary file contents for `city`
    pub fn write_raw(&self, city: CityKey, contents: &str) {
        std::fs::write(self.dir.path().join(city.file_name()), contents).expect("write fixture");
    }
}

/// Trip source serving fixed records for every city
pub struct MemorySource {
    records: Vec<TripRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<TripRecord>) -> Self {
        Self { records }
    }
}

impl TripSource for MemorySource {
    fn read_trips(&self, city: CityKey) -> Result<Vec<TripRecord>> {
        if self.records.is_empty() {
            return Err(BikeshareError::MissingDataFile {
                city,
                path: PathBuf::from(city.file_name()),
            });
        }
        Ok(self.records.clone())
    }
}
