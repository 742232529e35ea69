//! CLI interface for bikeshare
//!
//! Without `--city` the program runs the interactive session, asking for a
//! city and filters on stdin. With `--city` it prints the reports once and
//! exits, which is handy for scripts and piping into `jq`.
//!
//! # Example
//!
//! ```bash
//! # Interactive session over the data files in ./data
//! bikeshare --data-dir data
//!
//! # Reports for Chicago trips on Mondays in March, as JSON
//! bikeshare --city chicago --month march --day 0 --json
//!
//! # Reports plus the first ten raw rows
//! bikeshare --city "new york city" --rows 2
//! ```

use bikeshare_core::filters::TripFilter;
use bikeshare_core::types::{CityKey, DayOfWeek, Month};
use clap::Parser;
use std::path::PathBuf;

/// Explore US bikeshare trip data
#[derive(Parser, Debug, Clone)]
#[command(name = "bikeshare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, short = 'd', default_value = ".")]
    pub data_dir: PathBuf,

    /// Print reports for this city and exit instead of prompting
    #[arg(long, short = 'c')]
    pub city: Option<CityKey>,

    /// Only include trips starting in this month (January to June)
    #[arg(long, short = 'm', requires = "city")]
    pub month: Option<Month>,

    /// Only include trips starting on this day (0 = Monday .. 6 = Sunday, or a name)
    #[arg(long, requires = "city")]
    pub day: Option<DayOfWeek>,

    /// Number of five-row batches of raw rows to print after the reports
    #[arg(long, short = 'n', default_value_t = 0, requires = "city")]
    pub rows: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable the loading spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Filter built from `--month` and `--day`
    pub fn filter(&self) -> TripFilter {
        TripFilter::from_selectors(self.month, self.day)
    }
}
