//! Error types for bikeshare
//!
//! This module defines the error types used throughout the bikeshare crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use bikeshare_core::error::{BikeshareError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to BikeshareError
//!     let _file = std::fs::read_to_string("nonexistent.csv")?;
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::CityKey;

/// The kind of answer the interactive session was waiting for
///
/// Every invalid answer is reported through a single
/// [`BikeshareError::InvalidInput`] variant tagged with one of these,
/// so the prompt loop can retry the right question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCategory {
    /// City name
    City,
    /// Which filters to apply (month, day, both, none)
    FilterChoice,
    /// Month name, January to June
    Month,
    /// Day-of-week digit, 0 (Monday) to 6 (Sunday)
    Day,
    /// A yes/no confirmation
    YesNo,
}

impl InputCategory {
    /// Message shown to the user before the question is asked again
    pub fn retry_hint(&self) -> &'static str {
        match self {
            Self::City => "Invalid city entered. Try again.",
            Self::FilterChoice => "Invalid entry. Enter 'month', 'day', 'both', or 'none'.",
            Self::Month => "Invalid month entered. Try again.",
            Self::Day => "Invalid input. Use a digit between 0 and 6. Try again.",
            Self::YesNo => "Invalid input. Type 'yes' or 'no'.",
        }
    }
}

impl fmt::Display for InputCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City => write!(f, "city"),
            Self::FilterChoice => write!(f, "filter choice"),
            Self::Month => write!(f, "month"),
            Self::Day => write!(f, "day of week"),
            Self::YesNo => write!(f, "yes/no answer"),
        }
    }
}

/// Main error type for bikeshare operations
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed tabular data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The backing file for a city does not exist
    #[error("No data file for {city} at {}", path.display())]
    MissingDataFile {
        /// City whose file was requested
        city: CityKey,
        /// Resolved path of the file
        path: PathBuf,
    },

    /// A required column is absent from the header row
    #[error("Missing column '{column}' in {}", file.display())]
    MissingColumn {
        /// The file being read
        file: PathBuf,
        /// The missing header name
        column: String,
    },

    /// Parse error with file context
    #[error("Parse error in {}: {error}", file.display())]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// A selector outside its domain reached the core
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// User input that failed validation
    #[error("Invalid {category}: '{input}'")]
    InvalidInput {
        /// What kind of answer was expected
        category: InputCategory,
        /// The rejected text
        input: String,
    },
}

impl BikeshareError {
    /// Build an [`InvalidInput`](Self::InvalidInput) error
    pub fn invalid_input(category: InputCategory, input: impl Into<String>) -> Self {
        Self::InvalidInput {
            category,
            input: input.into(),
        }
    }

    /// Whether this error means the city's data could not be read
    pub fn is_data_source_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::Csv(_)
                | Self::MissingDataFile { .. }
                | Self::MissingColumn { .. }
                | Self::Parse { .. }
        )
    }

    /// The input category when this is an invalid-input error
    pub fn input_category(&self) -> Option<InputCategory> {
        match self {
            Self::InvalidInput { category, .. } => Some(*category),
            _ => None,
        }
    }
}

/// Convenience type alias for Results in bikeshare
///
/// # Example
///
/// ```
/// use bikeshare_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, BikeshareError>;
