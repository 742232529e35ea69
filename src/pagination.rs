//! Row paginator
//!
//! Walks a [`FilteredTable`] five rows at a time. The iterator is lazy, so
//! the caller decides after each batch whether to ask for the next one; an
//! empty table yields no batches at all.
//!
//! # Examples
//!
//! ```
//! use bikeshare::pagination::paginate;
//! use bikeshare_core::FilteredTable;
//!
//! let table = FilteredTable::default();
//! assert_eq!(paginate(&table).count(), 0);
//! ```

use bikeshare_core::table::{FilteredTable, Trip};
use std::iter::FusedIterator;

/// Maximum rows per batch
pub const BATCH_SIZE: usize = 5;

/// Inclusive index of the last row in the batch starting at `start`
///
/// Returns `None` when `start` is past the end of a table of `len` rows.
pub fn batch_end(start: usize, len: usize) -> Option<usize> {
    if start >= len {
        return None;
    }
    Some((start + BATCH_SIZE - 1).min(len - 1))
}

/// A run of up to [`BATCH_SIZE`] consecutive rows
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// Table position of the first row
    pub offset: usize,
    /// The rows, in table order
    pub rows: &'a [Trip],
    /// Whether this batch reaches the final row
    pub is_last: bool,
}

/// Lazy iterator over row batches
#[derive(Debug, Clone)]
pub struct RowPaginator<'a> {
    trips: &'a [Trip],
    offset: usize,
}

/// Start paginating `table` from its first row
pub fn paginate(table: &FilteredTable) -> RowPaginator<'_> {
    RowPaginator {
        trips: table.trips(),
        offset: 0,
    }
}

/// Rows covered by the first `batches` batches of `table`
pub fn leading_batches(table: &FilteredTable, batches: usize) -> &[Trip] {
    let rows = batches.saturating_mul(BATCH_SIZE).min(table.len());
    &table.trips()[..rows]
}

impl RowPaginator<'_> {
    /// Rows not yet yielded
    pub fn remaining(&self) -> usize {
        self.trips.len().saturating_sub(self.offset)
    }
}

impl<'a> Iterator for RowPaginator<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.trips.len();
        let end = batch_end(self.offset, len)?;

        let batch = Batch {
            offset: self.offset,
            rows: &self.trips[self.offset..=end],
            is_last: end == len - 1,
        };
        self.offset = end + 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let batches = self.remaining().div_ceil(BATCH_SIZE);
        (batches, Some(batches))
    }
}

impl ExactSizeIterator for RowPaginator<'_> {}

impl FusedIterator for RowPaginator<'_> {}
