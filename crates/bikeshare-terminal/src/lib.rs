//! Terminal output formatting for bikeshare
//!
//! This crate provides table and JSON formatters for the four statistics
//! reports and for batches of raw trip rows.

pub mod output;

pub use output::{JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
