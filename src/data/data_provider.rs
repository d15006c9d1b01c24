//! Data provider trait for abstracting data access
//!
//! Hosts render through this trait without knowing whether they are looking
//! at a raw DataTable or a derived view's current page.

use std::fmt::Debug;

/// Core trait for read-only data access
///
/// This trait defines the minimal interface that any data source must provide
/// to a host for rendering and display.
pub trait DataProvider: Debug {
    /// Get a single row by index
    /// Returns None if the index is out of bounds
    fn get_row(&self, index: usize) -> Option<Vec<String>>;

    /// Get the column names/headers
    fn get_column_names(&self) -> Vec<String>;

    /// Get the total number of rows
    fn get_row_count(&self) -> usize;

    /// Get the total number of columns
    fn get_column_count(&self) -> usize;

    /// Get multiple rows for efficient rendering
    /// This is an optimization to avoid multiple get_row calls
    fn get_visible_rows(&self, start: usize, count: usize) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let end = (start + count).min(self.get_row_count());

        for i in start..end {
            if let Some(row) = self.get_row(i) {
                rows.push(row);
            }
        }

        rows
    }

    /// Get the display width for each column
    fn get_column_widths(&self) -> Vec<usize> {
        // Default implementation: calculate from first 100 rows
        let mut widths = vec![0; self.get_column_count()];
        let sample_size = 100.min(self.get_row_count());

        // Start with column name widths
        for (i, name) in self.get_column_names().iter().enumerate() {
            if i < widths.len() {
                widths[i] = name.len();
            }
        }

        for row_idx in 0..sample_size {
            if let Some(row) = self.get_row(row_idx) {
                for (col_idx, value) in row.iter().enumerate() {
                    if col_idx < widths.len() {
                        widths[col_idx] = widths[col_idx].max(value.len());
                    }
                }
            }
        }

        widths
    }

    /// Get a single cell value
    /// Returns None if row or column index is out of bounds
    fn get_cell_value(&self, row: usize, col: usize) -> Option<String> {
        self.get_row(row).and_then(|r| r.get(col).cloned())
    }

    /// Get a display-formatted cell value
    /// Returns empty string if indices are out of bounds
    fn get_display_value(&self, row: usize, col: usize) -> String {
        self.get_cell_value(row, col).unwrap_or_default()
    }
}

impl DataProvider for crate::data::datatable::DataTable {
    fn get_row(&self, index: usize) -> Option<Vec<String>> {
        self.get_row_as_strings(index)
    }

    fn get_column_names(&self) -> Vec<String> {
        self.column_titles()
    }

    fn get_row_count(&self) -> usize {
        self.row_count()
    }

    fn get_column_count(&self) -> usize {
        self.column_count()
    }
}
