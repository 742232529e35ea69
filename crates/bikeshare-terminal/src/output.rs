//! Output formatting module for bikeshare
//!
//! This module provides formatters for displaying reports and raw trip rows:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare_core::{CityKey, TripFilter};
//! use bikeshare_core::report_types::Reports;
//! use bikeshare_terminal::get_formatter;
//!
//! # fn show(reports: &Reports) {
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_reports(CityKey::Chicago, &TripFilter::new(), reports));
//! # }
//! ```

use bikeshare_core::filters::TripFilter;
use bikeshare_core::report_types::{
    Demographics, DurationReport, Mode, Reports, StationReport, TemporalReport, UserReport,
};
use bikeshare_core::table::Trip;
use bikeshare_core::types::CityKey;
use colored::*;
use prettytable::{Table, format, row};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt::Display;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Trait for output formatters
///
/// # Example Implementation
///
/// ```
/// use bikeshare_core::{CityKey, Trip, TripFilter};
/// use bikeshare_core::report_types::Reports;
/// use bikeshare_terminal::OutputFormatter;
///
/// struct CountFormatter;
///
/// impl OutputFormatter for CountFormatter {
///     fn format_reports(&self, city: CityKey, _filter: &TripFilter, reports: &Reports) -> String {
///         format!("{city}: {} trips", reports.duration.trip_count)
///     }
///
///     fn format_rows(&self, offset: usize, rows: &[Trip]) -> String {
///         format!("rows {offset}..{}", offset + rows.len())
///     }
/// }
/// ```
pub trait OutputFormatter {
    /// Format the four statistics reports for a city and filter
    fn format_reports(&self, city: CityKey, filter: &TripFilter, reports: &Reports) -> String;

    /// Format a batch of raw rows starting at table position `offset`
    fn format_rows(&self, offset: usize, rows: &[Trip]) -> String;

    /// Format the reports followed by the table's leading `rows`, as one document
    fn format_reports_with_rows(
        &self,
        city: CityKey,
        filter: &TripFilter,
        reports: &Reports,
        rows: &[Trip],
    ) -> String {
        let mut output = self.format_reports(city, filter, reports);
        if !rows.is_empty() {
            output.push('\n');
            output.push_str(&self.format_rows(0, rows));
        }
        output
    }
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Whether to use colored headings (respects NO_COLOR environment variable)
    colored_output: bool,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new() -> Self {
        Self {
            colored_output: std::env::var("NO_COLOR").is_err(),
        }
    }

    /// A formatter that never emits color codes
    pub fn plain() -> Self {
        Self {
            colored_output: false,
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.colored_output {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Format a number with thousands separators
    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Render seconds as "1d 2h 3m 4s", dropping leading zero units
    fn format_duration(seconds: f64) -> String {
        let total = seconds.round() as u64;
        let (days, rest) = (total / 86_400, total % 86_400);
        let (hours, rest) = (rest / 3_600, rest % 3_600);
        let (minutes, secs) = (rest / 60, rest % 60);

        let mut parts = Vec::new();
        if days > 0 {
            parts.push(format!("{days}d"));
        }
        if days > 0 || hours > 0 {
            parts.push(format!("{hours}h"));
        }
        if days > 0 || hours > 0 || minutes > 0 {
            parts.push(format!("{minutes}m"));
        }
        parts.push(format!("{secs}s"));
        parts.join(" ")
    }

    fn format_seconds(seconds: f64) -> String {
        format!("{seconds:.2} s ({})", Self::format_duration(seconds))
    }

    fn month_name(month: u32) -> String {
        MONTH_NAMES
            .get((month as usize).wrapping_sub(1))
            .map_or_else(|| month.to_string(), |name| name.to_string())
    }

    fn format_mode_with<T>(mode: &Mode<T>, render: impl Fn(&T) -> String) -> String {
        match mode {
            Mode::NoData => "no data".to_string(),
            Mode::Found { values, count } => format!(
                "{} (count: {})",
                values.iter().map(render).collect::<Vec<_>>().join(", "),
                Self::format_number(*count)
            ),
        }
    }

    fn format_mode<T: Display>(mode: &Mode<T>) -> String {
        Self::format_mode_with(mode, |v| v.to_string())
    }

    fn optional<T: Display>(value: Option<T>) -> String {
        value.map_or_else(|| "no data".to_string(), |v| v.to_string())
    }

    fn stat_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Statistic", b -> "Value"]);
        table
    }

    fn count_table(label: &str, counts: &BTreeMap<String, usize>) -> String {
        if counts.is_empty() {
            return format!("{label}: no data\n");
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> label, b -> "Trips"]);
        for (key, count) in counts {
            table.add_row(row![key, r -> Self::format_number(*count)]);
        }
        table.to_string()
    }

    fn format_temporal(&self, report: &TemporalReport) -> String {
        let mut table = Self::stat_table();
        table.add_row(row![
            "Most common month",
            Self::format_mode_with(&report.popular_month, |m| Self::month_name(*m))
        ]);
        table.add_row(row![
            "Most common day of week",
            Self::format_mode(&report.popular_day)
        ]);
        table.add_row(row![
            "Most common start hour",
            Self::format_mode_with(&report.popular_hour, |h| format!("{h:02}:00"))
        ]);
        format!(
            "\n{}\n{}",
            self.heading("1. Most common times of travel"),
            table
        )
    }

    fn format_station(&self, report: &StationReport) -> String {
        let mut table = Self::stat_table();
        table.add_row(row![
            "Most common start station",
            Self::format_mode(&report.popular_start_station)
        ]);
        table.add_row(row![
            "Most common end station",
            Self::format_mode(&report.popular_end_station)
        ]);
        table.add_row(row![
            "Most common start + end station",
            Self::format_mode(&report.popular_trip)
        ]);
        table.add_row(row![
            "Most common route",
            Self::format_mode_with(&report.popular_route, |(start, end)| format!(
                "{start} -> {end}"
            ))
        ]);
        format!(
            "\n{}\n{}",
            self.heading("2. Most popular stations and trip"),
            table
        )
    }

    fn format_duration_report(&self, report: &DurationReport) -> String {
        let mut table = Self::stat_table();
        table.add_row(row!["Trips", r -> Self::format_number(report.trip_count)]);
        table.add_row(row![
            "Total trip duration",
            r -> Self::format_seconds(report.total_seconds)
        ]);
        table.add_row(row![
            "Mean trip duration",
            r -> Self::optional(report.mean_seconds.map(Self::format_seconds))
        ]);
        format!("\n{}\n{}", self.heading("3. Trip duration"), table)
    }

    fn format_user(&self, city: CityKey, report: &UserReport) -> String {
        let mut output = format!("\n{}\n", self.heading("4. User statistics"));
        output.push_str(&Self::count_table("User Type", &report.user_type_counts));

        match &report.demographics {
            Demographics::NotAvailable => {
                output.push_str(&format!(
                    "No gender or birth year data available for {city}.\n"
                ));
            }
            Demographics::Available {
                gender_counts,
                birth_year_mode,
                birth_year_max,
                birth_year_min,
            } => {
                output.push_str(&Self::count_table("Gender", gender_counts));
                let mut table = Self::stat_table();
                table.add_row(row![
                    "Most common birth year",
                    Self::format_mode(birth_year_mode)
                ]);
                table.add_row(row!["Most recent birth year", Self::optional(*birth_year_max)]);
                table.add_row(row!["Earliest birth year", Self::optional(*birth_year_min)]);
                output.push_str(&table.to_string());
            }
        }
        output
    }
}

impl OutputFormatter for TableFormatter {
    fn format_reports(&self, city: CityKey, filter: &TripFilter, reports: &Reports) -> String {
        let mut output = self.heading(&format!("Bikeshare statistics for {city} ({filter})"));
        output.push('\n');
        output.push_str(&self.format_temporal(&reports.temporal));
        output.push_str(&self.format_station(&reports.station));
        output.push_str(&self.format_duration_report(&reports.duration));
        output.push_str(&self.format_user(city, &reports.user));
        output
    }

    fn format_rows(&self, offset: usize, rows: &[Trip]) -> String {
        let mut output = String::new();

        for (i, trip) in rows.iter().enumerate() {
            let record = trip.record();
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
            table.set_titles(row![b -> format!("Row {}", offset + i), b -> ""]);

            table.add_row(row![
                "Id",
                record.id.map_or_else(|| "-".to_string(), |id| id.to_string())
            ]);
            table.add_row(row!["Start Time", record.start_time.format("%Y-%m-%d %H:%M:%S")]);
            table.add_row(row!["End Time", record.end_time.as_deref().unwrap_or("-")]);
            table.add_row(row!["Trip Duration", format!("{} s", record.trip_duration)]);
            table.add_row(row!["Start Station", record.start_station]);
            table.add_row(row!["End Station", record.end_station]);
            table.add_row(row!["User Type", record.user_type.as_deref().unwrap_or("-")]);
            table.add_row(row!["Gender", record.gender.as_deref().unwrap_or("-")]);
            table.add_row(row![
                "Birth Year",
                record.birth_year.map_or_else(|| "-".to_string(), |y| y.to_string())
            ]);
            table.add_row(row!["Month", Self::month_name(trip.month())]);
            table.add_row(row!["Day of Week", trip.day_of_week()]);

            output.push_str(&table.to_string());
            output.push('\n');
        }

        output
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: &serde_json::Value) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_reports(&self, city: CityKey, filter: &TripFilter, reports: &Reports) -> String {
        let output = json!({
            "city": city,
            "filter": filter,
            "reports": reports,
        });
        Self::render(&output)
    }

    fn format_rows(&self, offset: usize, rows: &[Trip]) -> String {
        let output = json!({
            "offset": offset,
            "rows": rows,
        });
        Self::render(&output)
    }

    fn format_reports_with_rows(
        &self,
        city: CityKey,
        filter: &TripFilter,
        reports: &Reports,
        rows: &[Trip],
    ) -> String {
        let output = json!({
            "city": city,
            "filter": filter,
            "reports": reports,
            "rows": rows,
        });
        Self::render(&output)
    }
}

/// Get the appropriate formatter based on output preference
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::types::{DayOfWeek, Month, TripRecord};
    use chrono::NaiveDate;

    fn found<T: Ord + std::hash::Hash + Clone>(value: T, count: usize) -> Mode<T> {
        Mode::from_values(std::iter::repeat_n(value, count))
    }

    fn sample_reports(demographics: Demographics) -> Reports {
        let mut user_types = BTreeMap::new();
        user_types.insert("Customer".to_string(), 1);
        user_types.insert("Subscriber".to_string(), 1_234);

        Reports {
            temporal: TemporalReport {
                popular_month: found(6, 10),
                popular_day: Mode::from_values([DayOfWeek::Monday, DayOfWeek::Friday]),
                popular_hour: found(17, 4),
            },
            station: StationReport {
                popular_start_station: found("Streeter Dr & Grand Ave".to_string(), 3),
                popular_end_station: found("Lake Shore Dr & Monroe St".to_string(), 2),
                popular_trip: found("AX".to_string(), 2),
                popular_route: found(("A".to_string(), "X".to_string()), 2),
            },
            duration: DurationReport {
                trip_count: 3,
                total_seconds: 3_725.0,
                mean_seconds: Some(1_241.666),
            },
            user: UserReport {
                user_type_counts: user_types,
                demographics,
            },
        }
    }

    fn empty_reports() -> Reports {
        Reports {
            temporal: TemporalReport {
                popular_month: Mode::NoData,
                popular_day: Mode::NoData,
                popular_hour: Mode::NoData,
            },
            station: StationReport {
                popular_start_station: Mode::NoData,
                popular_end_station: Mode::NoData,
                popular_trip: Mode::NoData,
                popular_route: Mode::NoData,
            },
            duration: DurationReport {
                trip_count: 0,
                total_seconds: 0.0,
                mean_seconds: None,
            },
            user: UserReport {
                user_type_counts: BTreeMap::new(),
                demographics: Demographics::NotAvailable,
            },
        }
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(TableFormatter::format_number(1234567), "1,234,567");
        assert_eq!(TableFormatter::format_number(999), "999");
        assert_eq!(TableFormatter::format_number(0), "0");
    }

    #[test]
    fn test_duration_formatting() {
        assert_eq!(TableFormatter::format_duration(0.0), "0s");
        assert_eq!(TableFormatter::format_duration(59.6), "1m 0s");
        assert_eq!(TableFormatter::format_duration(3_725.0), "1h 2m 5s");
        assert_eq!(TableFormatter::format_duration(90_061.0), "1d 1h 1m 1s");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(TableFormatter::month_name(1), "January");
        assert_eq!(TableFormatter::month_name(12), "December");
        assert_eq!(TableFormatter::month_name(13), "13");
    }

    #[test]
    fn test_table_reports() {
        let formatter = TableFormatter::plain();
        let filter = TripFilter::new().with_month(Month::June);
        let output = formatter.format_reports(
            CityKey::Chicago,
            &filter,
            &sample_reports(Demographics::Available {
                gender_counts: BTreeMap::from([("Female".to_string(), 2)]),
                birth_year_mode: found(1989, 2),
                birth_year_max: Some(2001),
                birth_year_min: Some(1950),
            }),
        );

        assert!(output.contains("Bikeshare statistics for Chicago (June, all days)"));
        assert!(output.contains("June (count: 10)"));
        assert!(output.contains("Monday, Friday (count: 1)"));
        assert!(output.contains("17:00 (count: 4)"));
        assert!(output.contains("AX (count: 2)"));
        assert!(output.contains("A -> X (count: 2)"));
        assert!(output.contains("3725.00 s (1h 2m 5s)"));
        assert!(output.contains("1,234"));
        assert!(output.contains("Female"));
        assert!(output.contains("1989 (count: 2)"));
        assert!(output.contains("2001"));
        assert!(output.contains("1950"));
    }

    #[test]
    fn test_table_reports_without_demographics() {
        let formatter = TableFormatter::plain();
        let output = formatter.format_reports(
            CityKey::Washington,
            &TripFilter::new(),
            &sample_reports(Demographics::NotAvailable),
        );
        assert!(output.contains("No gender or birth year data available for Washington."));
        assert!(!output.contains("Most common birth year"));
    }

    #[test]
    fn test_table_reports_on_empty_table() {
        let formatter = TableFormatter::plain();
        let output =
            formatter.format_reports(CityKey::Washington, &TripFilter::new(), &empty_reports());
        assert!(output.contains("no data"));
        assert!(output.contains("User Type: no data"));
    }

    fn sample_trip() -> Trip {
        Trip::new(TripRecord {
            id: Some(42),
            start_time: NaiveDate::from_ymd_opt(2017, 3, 6)
                .unwrap()
                .and_hms_opt(7, 5, 0)
                .unwrap(),
            end_time: Some("2017-03-06 07:20:00".to_string()),
            trip_duration: 900.0,
            start_station: "Clark St & Elm St".to_string(),
            end_station: "Wells St & Huron St".to_string(),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: Some(1984),
        })
    }

    #[test]
    fn test_table_rows() {
        let output = TableFormatter::plain().format_rows(10, &[sample_trip()]);
        assert!(output.contains("Row 10"));
        assert!(output.contains("2017-03-06 07:05:00"));
        assert!(output.contains("Clark St & Elm St"));
        assert!(output.contains("March"));
        assert!(output.contains("Monday"));
        assert!(output.contains("1984"));
    }

    #[test]
    fn test_json_reports() {
        let output = JsonFormatter.format_reports(
            CityKey::NewYorkCity,
            &TripFilter::new().with_day(DayOfWeek::Sunday),
            &empty_reports(),
        );
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["city"], "new_york_city");
        assert_eq!(value["filter"]["day"], "sunday");
        assert!(value["filter"]["month"].is_null());
        assert_eq!(value["reports"]["duration"]["trip_count"], 0);
        assert!(value["reports"]["duration"]["mean_seconds"].is_null());
        assert_eq!(value["reports"]["temporal"]["popular_month"]["status"], "no_data");
        assert_eq!(
            value["reports"]["user"]["demographics"]["status"],
            "not_available"
        );
    }

    #[test]
    fn test_json_rows() {
        let output = JsonFormatter.format_rows(5, &[]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["offset"], 5);
        assert_eq!(value["rows"], json!([]));
    }

    #[test]
    fn test_json_reports_with_rows_is_one_document() {
        let rows = [sample_trip(), sample_trip()];
        let output = JsonFormatter.format_reports_with_rows(
            CityKey::Chicago,
            &TripFilter::new().with_month(Month::March),
            &empty_reports(),
            &rows,
        );
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["city"], "chicago");
        assert_eq!(value["reports"]["duration"]["trip_count"], 0);
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["rows"][0]["id"], 42);
    }

    #[test]
    fn test_table_reports_with_rows() {
        let formatter = TableFormatter::plain();
        let output = formatter.format_reports_with_rows(
            CityKey::Chicago,
            &TripFilter::new(),
            &empty_reports(),
            &[sample_trip()],
        );
        assert!(output.contains("1. Most common times of travel"));
        assert!(output.contains("Row 0"));

        let without_rows = formatter.format_reports_with_rows(
            CityKey::Chicago,
            &TripFilter::new(),
            &empty_reports(),
            &[],
        );
        assert!(!without_rows.contains("Row 0"));
    }
}
