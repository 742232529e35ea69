//! Interactive session
//!
//! Asks for a city and filters, prints the four reports, offers the raw rows
//! five at a time, and repeats until the user declines to restart.
//!
//! Every answer goes through a parser returning
//! [`BikeshareError::InvalidInput`] tagged with an [`InputCategory`]; the
//! [`Prompter`] prints the category's hint and asks the same question again.
//! Reaching end of input ends the session without error.

use bikeshare_core::error::{BikeshareError, InputCategory, Result};
use bikeshare_core::filters::TripFilter;
use bikeshare_core::source::TripSource;
use bikeshare_core::table::FilteredTable;
use bikeshare_core::types::{CityKey, DayOfWeek, Month};
use bikeshare_data::DataLoader;
use bikeshare_terminal::OutputFormatter;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::pagination::paginate;
use crate::statistics::compute_reports;

const CITY_PROMPT: &str =
    "Which city would you like see data for? Enter 'Chicago', 'New York City', or 'Washington': ";
const FILTER_PROMPT: &str = "\nWould you like to filter the data for month, day, both, \
or none at all? Enter 'month', 'day', 'both', or 'none': ";
const MONTH_PROMPT: &str =
    "Enter the name of the month from 'January' to 'June', such as 'February': ";
const DAY_PROMPT: &str = "\nEnter the day of the week. Use a digit between '0' and '6', \
where '0' is for Monday and '6' is for Sunday: ";
const VIEW_ROWS_PROMPT: &str = "\nWould you like to see data for the first 5 rows \
(or all rows if there are less than 5)? Type 'yes' or 'no': ";
const MORE_ROWS_PROMPT: &str = "\nWould you like to see more rows? Type 'yes' or 'no': ";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter 'yes' or 'no': ";

/// Which selectors the user wants to set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChoice {
    Month,
    Day,
    Both,
    None,
}

impl FilterChoice {
    fn wants_month(&self) -> bool {
        matches!(self, Self::Month | Self::Both)
    }

    fn wants_day(&self) -> bool {
        matches!(self, Self::Day | Self::Both)
    }
}

/// Parse a city name, case-insensitively
pub fn parse_city(input: &str) -> Result<CityKey> {
    input
        .parse()
        .map_err(|_| BikeshareError::invalid_input(InputCategory::City, input))
}

/// Parse `month`, `day`, `both` or `none`
pub fn parse_filter_choice(input: &str) -> Result<FilterChoice> {
    match input.trim().to_lowercase().as_str() {
        "month" => Ok(FilterChoice::Month),
        "day" => Ok(FilterChoice::Day),
        "both" => Ok(FilterChoice::Both),
        "none" => Ok(FilterChoice::None),
        _ => Err(BikeshareError::invalid_input(
            InputCategory::FilterChoice,
            input,
        )),
    }
}

/// Parse a month name from January to June
pub fn parse_month(input: &str) -> Result<Month> {
    input
        .parse()
        .map_err(|_| BikeshareError::invalid_input(InputCategory::Month, input))
}

/// Parse a day digit, 0 (Monday) to 6 (Sunday)
pub fn parse_day(input: &str) -> Result<DayOfWeek> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(|index| DayOfWeek::from_index(index).ok())
        .ok_or_else(|| BikeshareError::invalid_input(InputCategory::Day, input))
}

/// Parse `yes` or `no`
pub fn parse_yes_no(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(BikeshareError::invalid_input(InputCategory::YesNo, input)),
    }
}

/// Asks questions until an answer parses
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over the given streams
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask `question` until `parse` accepts the answer
    ///
    /// Returns `Ok(None)` at end of input. Errors other than
    /// [`BikeshareError::InvalidInput`] are returned as-is.
    pub fn ask<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<Option<T>> {
        loop {
            write!(self.output, "{question}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            match parse(line.trim()) {
                Ok(value) => return Ok(Some(value)),
                Err(error) => match error.input_category() {
                    Some(category) => {
                        debug!("Rejected {}: {:?}", category, line.trim());
                        writeln!(self.output, "{}", category.retry_hint())?;
                    }
                    None => return Err(error),
                },
            }
        }
    }

    /// Write a block of text followed by a newline
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// Whether the session should carry on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Drives the prompt / report / browse loop
pub struct InteractiveController<'a, S, R, W> {
    loader: &'a DataLoader<S>,
    formatter: &'a dyn OutputFormatter,
    prompter: Prompter<R, W>,
}

impl<'a, S, R, W> InteractiveController<'a, S, R, W>
where
    S: TripSource,
    R: BufRead,
    W: Write,
{
    /// Create a controller reading answers from `input` and writing to `output`
    pub fn new(
        loader: &'a DataLoader<S>,
        formatter: &'a dyn OutputFormatter,
        input: R,
        output: W,
    ) -> Self {
        Self {
            loader,
            formatter,
            prompter: Prompter::new(input, output),
        }
    }

    /// Run sessions until the user declines to restart or input ends
    pub fn run(&mut self) -> Result<()> {
        info!("Starting interactive session");
        loop {
            if self.run_once()? == Flow::Quit {
                return Ok(());
            }
            match self.prompter.ask(RESTART_PROMPT, parse_yes_no)? {
                Some(true) => continue,
                _ => return Ok(()),
            }
        }
    }

    fn run_once(&mut self) -> Result<Flow> {
        let Some(city) = self.prompter.ask(CITY_PROMPT, parse_city)? else {
            return Ok(Flow::Quit);
        };
        let Some(filter) = self.ask_filter()? else {
            return Ok(Flow::Quit);
        };

        let table = match self.loader.load(city, &filter) {
            Ok(table) => table,
            Err(error) if error.is_data_source_error() => {
                warn!("Failed to load {}: {}", city, error);
                self.prompter
                    .say(&format!("\nCould not load data for {city}: {error}"))?;
                return Ok(Flow::Continue);
            }
            Err(error) => return Err(error),
        };

        let reports = compute_reports(&table, city);
        self.prompter
            .say(&self.formatter.format_reports(city, &filter, &reports))?;

        self.browse_rows(&table)
    }

    fn ask_filter(&mut self) -> Result<Option<TripFilter>> {
        let Some(choice) = self.prompter.ask(FILTER_PROMPT, parse_filter_choice)? else {
            return Ok(None);
        };

        let mut filter = TripFilter::new();
        if choice.wants_month() {
            let Some(month) = self.prompter.ask(MONTH_PROMPT, parse_month)? else {
                return Ok(None);
            };
            filter = filter.with_month(month);
        }
        if choice.wants_day() {
            let Some(day) = self.prompter.ask(DAY_PROMPT, parse_day)? else {
                return Ok(None);
            };
            filter = filter.with_day(day);
        }
        Ok(Some(filter))
    }

    fn browse_rows(&mut self, table: &FilteredTable) -> Result<Flow> {
        match self.prompter.ask(VIEW_ROWS_PROMPT, parse_yes_no)? {
            None => return Ok(Flow::Quit),
            Some(false) => return Ok(Flow::Continue),
            Some(true) => {}
        }

        if table.is_empty() {
            self.prompter.say("No rows match the selected filters.")?;
            return Ok(Flow::Continue);
        }

        for batch in paginate(table) {
            self.prompter
                .say(&self.formatter.format_rows(batch.offset, batch.rows))?;
            if batch.is_last {
                break;
            }
            match self.prompter.ask(MORE_ROWS_PROMPT, parse_yes_no)? {
                Some(true) => continue,
                Some(false) => break,
                None => return Ok(Flow::Quit),
            }
        }
        Ok(Flow::Continue)
    }
}
