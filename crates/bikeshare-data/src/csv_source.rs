//! CSV trip source
//!
//! Each city's trips live in one CSV file inside a data directory, named by
//! [`CityKey::file_name`]. The first row holds column names; the columns this
//! crate reads are:
//!
//! | Column          | Required                  |
//! |-----------------|---------------------------|
//! | (unnamed index) | no                        |
//! | `Start Time`    | yes                       |
//! | `End Time`      | no                        |
//! | `Trip Duration` | yes                       |
//! | `Start Station` | yes                       |
//! | `End Station`   | yes                       |
//! | `User Type`     | yes                       |
//! | `Gender`        | cities with demographics  |
//! | `Birth Year`    | cities with demographics  |
//!
//! Any other columns are ignored.

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::source::TripSource;
use bikeshare_core::types::{CityKey, TripRecord, parse_timestamp};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const REQUIRED_COLUMNS: &[&str] = &[
    "Start Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

const DEMOGRAPHIC_COLUMNS: &[&str] = &["Gender", "Birth Year"];

/// One CSV row as written in the file
#[derive(Debug, Deserialize)]
struct RawTripRow {
    #[serde(rename = "", default)]
    index: Option<String>,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

impl RawTripRow {
    fn into_record(self, city: CityKey) -> std::result::Result<TripRecord, String> {
        let start_time = parse_timestamp(&self.start_time)
            .ok_or_else(|| format!("unparseable start time '{}'", self.start_time))?;

        if !self.trip_duration.is_finite() || self.trip_duration < 0.0 {
            return Err(format!("invalid trip duration {}", self.trip_duration));
        }

        // Demographic cells are only read for cities that publish them
        let (gender, birth_year) = if city.has_demographics() {
            let birth_year = non_empty(self.birth_year)
                .map(|year| parse_birth_year(&year))
                .transpose()?;
            (non_empty(self.gender), birth_year)
        } else {
            (None, None)
        };

        Ok(TripRecord {
            id: self.index.and_then(|i| i.parse().ok()),
            start_time,
            end_time: non_empty(self.end_time),
            trip_duration: self.trip_duration,
            start_station: self.start_station,
            end_station: self.end_station,
            user_type: non_empty(self.user_type),
            gender,
            birth_year,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Birth years are written as floats, e.g. `1992.0`
fn parse_birth_year(cell: &str) -> std::result::Result<i32, String> {
    cell.parse::<f64>()
        .ok()
        .filter(|year| year.is_finite())
        .map(|year| year.round() as i32)
        .ok_or_else(|| format!("invalid birth year '{cell}'"))
}

/// Reads city trip files from a data directory
#[derive(Debug, Clone)]
pub struct CsvTripSource {
    /// Directory holding the city files
    data_dir: PathBuf,
    /// Whether to show a spinner while reading
    show_progress: bool,
}

impl CsvTripSource {
    /// Create a source reading from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            show_progress: false,
        }
    }

    /// Enable or disable the loading spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Full path of a city's data file
    pub fn path_for(&self, city: CityKey) -> PathBuf {
        self.data_dir.join(city.file_name())
    }

    fn check_columns(headers: &csv::StringRecord, city: CityKey, path: &Path) -> Result<()> {
        let demographic: &[&str] = if city.has_demographics() {
            DEMOGRAPHIC_COLUMNS
        } else {
            &[]
        };

        for column in REQUIRED_COLUMNS.iter().chain(demographic) {
            if !headers.iter().any(|h| h == *column) {
                return Err(BikeshareError::MissingColumn {
                    file: path.to_path_buf(),
                    column: (*column).to_string(),
                });
            }
        }
        Ok(())
    }

    fn create_spinner(&self, city: CityKey) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg} {pos} rows") {
            pb.set_style(style);
        }
        pb.set_message(format!("Loading {city} trips"));
        Some(pb)
    }
}

impl TripSource for CsvTripSource {
    fn read_trips(&self, city: CityKey) -> Result<Vec<TripRecord>> {
        let path = self.path_for(city);
        if !path.is_file() {
            return Err(BikeshareError::MissingDataFile { city, path });
        }
        debug!("Reading {} trips from {}", city, path.display());

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)?;
        let headers = reader.headers()?.clone();
        Self::check_columns(&headers, city, &path)?;

        let spinner = self.create_spinner(city);
        let mut records = Vec::new();

        for result in reader.records() {
            let row = result?;
            let line = row.position().map_or(0, |p| p.line());
            let raw: RawTripRow =
                row.deserialize(Some(&headers))
                    .map_err(|e| BikeshareError::Parse {
                        file: path.clone(),
                        error: format!("line {line}: {e}"),
                    })?;
            let record = raw.into_record(city).map_err(|error| BikeshareError::Parse {
                file: path.clone(),
                error: format!("line {line}: {error}"),
            })?;
            trace!("line {}: trip starting {}", line, record.start_time);
            records.push(record);

            if let Some(pb) = &spinner {
                pb.inc(1);
            }
        }

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        debug!("Read {} trips for {}", records.len(), city);
        Ok(records)
    }
}
