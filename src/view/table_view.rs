//! A view over a DataTable that filters, sorts, paginates, and tracks
//! page-local selection without modifying the underlying data
//!
//! Transitions run to completion synchronously; the derived index list is
//! recomputed from the current state on every change. Invalid transition
//! inputs never error - they are rejected as no-ops so UI event wiring can
//! call straight through.

use anyhow::Result;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::config::ViewOptions;
use crate::data::data_provider::DataProvider;
use crate::data::datatable::{DataColumn, DataRow, DataTable, DataValue};
use crate::data::value_compare::compare_optional_values;
use crate::view::actions::{ActionRegistry, RowAction};
use crate::view::filter::{compile_filter_regex, FilterMode, RowFilter};
use crate::view::state::{SortOrder, SortState, ViewState};

/// 1-based display range, e.g. "showing 1 to 10 of 42"
/// All zeros when the filtered collection is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRange {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

/// The tabular view engine
pub struct TableView {
    /// The underlying immutable data source
    source: Arc<DataTable>,

    options: ViewOptions,
    state: ViewState,
    row_filter: RowFilter,
    actions: ActionRegistry,

    /// Source row indices that survive filtering, in sorted order
    visible_rows: Vec<usize>,
}

impl fmt::Debug for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("source", &self.source.name)
            .field("state", &self.state)
            .field("visible_rows", &self.visible_rows.len())
            .field("actions", &self.actions)
            .finish()
    }
}

impl TableView {
    /// Create a view over a prebuilt table
    pub fn new(source: Arc<DataTable>, options: ViewOptions) -> Self {
        let page_size = options.pagination.page_size.max(1);
        let row_filter = RowFilter::new(options.filtering.mode, options.filtering.fuzzy_threshold);

        let mut view = Self {
            source,
            options,
            state: ViewState::new(page_size),
            row_filter,
            actions: ActionRegistry::new(),
            visible_rows: Vec::new(),
        };
        view.recompute();
        view
    }

    /// Create a view from a column schema and a row collection
    /// Fails if any row's arity does not match the schema
    pub fn with_schema(
        columns: Vec<DataColumn>,
        rows: Vec<DataRow>,
        options: ViewOptions,
    ) -> Result<Self> {
        let mut table = DataTable::new("view");
        for column in columns {
            table.add_column(column);
        }
        for row in rows {
            table.add_row(row)?;
        }
        table.infer_column_types();

        Ok(Self::new(Arc::new(table), options))
    }

    /// Register row/bulk action handlers
    pub fn with_actions(mut self, actions: ActionRegistry) -> Self {
        self.actions = actions;
        self
    }

    /// Get the source DataTable
    pub fn source(&self) -> &DataTable {
        &self.source
    }

    // --- transitions -----------------------------------------------------

    /// Set the global filter text
    /// In regex mode a pattern that fails to compile leaves the filter unchanged
    pub fn set_global_filter(&mut self, text: &str) {
        if !self.options.filtering.enabled {
            debug!("Filtering disabled, ignoring global filter {:?}", text);
            return;
        }

        let trimmed = text.trim();
        if self.row_filter.mode() == FilterMode::Regex && !trimmed.is_empty() {
            match compile_filter_regex(trimmed) {
                Some(re) => self.state.filter.regex = Some(re),
                None => {
                    debug!("Rejecting invalid filter pattern {:?}", text);
                    return;
                }
            }
        } else {
            self.state.filter.regex = None;
        }

        self.state.filter.global = text.to_string();
        self.recompute();
    }

    /// Set or clear a per-column filter; an empty value clears it
    /// Unknown or non-filterable column keys are ignored
    pub fn set_column_filter(&mut self, key: &str, value: &str) {
        if !self.options.filtering.enabled {
            return;
        }

        match self.source.get_column(key) {
            Some(column) if column.filterable => {}
            _ => {
                debug!("Ignoring filter on unknown/non-filterable column {:?}", key);
                return;
            }
        }

        if value.is_empty() {
            self.state.filter.columns.remove(key);
        } else {
            self.state.filter.columns.insert(key.to_string(), value.to_string());
        }
        self.recompute();
    }

    /// Drop the global and all per-column filters
    pub fn clear_filters(&mut self) {
        if self.state.filter.is_empty() {
            return;
        }
        self.state.filter = Default::default();
        self.recompute();
    }

    /// Sort by a column key: repeated calls on the same column toggle the
    /// direction, a different column resets to ascending
    /// Unknown or non-sortable keys are ignored
    pub fn set_sort(&mut self, key: &str) {
        if !self.options.sorting.enabled {
            return;
        }

        let Some(col_idx) = self.source.get_column_index(key) else {
            debug!("Ignoring sort on unknown column {:?}", key);
            return;
        };
        if !self.source.columns[col_idx].sortable {
            debug!("Ignoring sort on non-sortable column {:?}", key);
            return;
        }

        if self.state.sort.column == Some(col_idx) {
            self.state.sort.order = self.state.sort.order.toggled();
        } else {
            self.state.sort = SortState {
                column: Some(col_idx),
                order: SortOrder::Ascending,
            };
        }
        debug!(
            "Sorting column {:?} {:?}",
            key, self.state.sort.order
        );
        self.recompute();
    }

    /// Jump to a page, clamped to the last page; page 0 is rejected
    pub fn set_page(&mut self, page: usize) {
        if page == 0 {
            debug!("Rejecting set_page(0)");
            return;
        }

        let clamped = page.min(self.total_pages());
        if clamped != self.state.current_page {
            self.state.current_page = clamped;
            self.state.selection.clear();
        }
    }

    /// Change the page size and return to the first page; 0 is rejected
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            debug!("Rejecting set_page_size(0)");
            return;
        }

        self.state.page_size = page_size;
        self.state.current_page = 1;
        self.state.selection.clear();
    }

    /// Select or clear every row of the current page
    pub fn select_all(&mut self, checked: bool) {
        if checked {
            let len = self.page_len();
            self.state.selection.select_all(len);
        } else {
            self.state.selection.clear();
        }
    }

    /// Select or clear one page-local row; out-of-range indices are ignored
    pub fn select_row(&mut self, index: usize, checked: bool) {
        if index >= self.page_len() {
            debug!("Ignoring selection of out-of-range row {}", index);
            return;
        }
        self.state.selection.set(index, checked);
    }

    // --- queries ---------------------------------------------------------

    /// Rows of the current page, in display order
    pub fn visible_rows(&self) -> Vec<DataRow> {
        let (start, end) = self.page_bounds();
        self.visible_rows[start..end]
            .iter()
            .filter_map(|&idx| self.source.rows.get(idx).cloned())
            .collect()
    }

    /// Source indices of the current page's rows
    pub fn visible_row_indices(&self) -> &[usize] {
        let (start, end) = self.page_bounds();
        &self.visible_rows[start..end]
    }

    /// Number of rows surviving the filter stage
    pub fn filtered_count(&self) -> usize {
        self.visible_rows.len()
    }

    /// Total page count; at least 1 even for an empty collection
    pub fn total_pages(&self) -> usize {
        if !self.options.pagination.enabled {
            return 1;
        }
        self.visible_rows.len().div_ceil(self.state.page_size).max(1)
    }

    /// 1-based record range for display
    pub fn record_range(&self) -> RecordRange {
        let total = self.visible_rows.len();
        if total == 0 {
            return RecordRange {
                start: 0,
                end: 0,
                total: 0,
            };
        }

        let (start, end) = self.page_bounds();
        RecordRange {
            start: start + 1,
            end,
            total,
        }
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    /// Number of rows on the current page
    pub fn page_len(&self) -> usize {
        let (start, end) = self.page_bounds();
        end - start
    }

    /// The active sort, if any
    pub fn sort_state(&self) -> &SortState {
        &self.state.sort
    }

    /// Render one cell of the current page, via the column's renderer when set
    pub fn render_cell(&self, page_row: usize, col: usize) -> String {
        let Some(row) = self.page_row(page_row) else {
            return String::new();
        };
        let Some(column) = self.source.columns.get(col) else {
            return String::new();
        };

        let value = row.get(col).unwrap_or(&DataValue::Null);
        match &column.renderer {
            Some(render) => render(value, row),
            None => value.to_string(),
        }
    }

    pub fn selected_count(&self) -> usize {
        self.state.selection.count()
    }

    /// Selected page-local indices, ascending
    pub fn selected_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.state.selection.rows.iter().copied().collect();
        indices.sort_unstable();
        indices
    }

    /// Selected rows with their page-local indices, ascending
    pub fn selected_rows(&self) -> Vec<(usize, DataRow)> {
        self.selected_indices()
            .into_iter()
            .filter_map(|idx| self.page_row(idx).cloned().map(|row| (idx, row)))
            .collect()
    }

    // --- action dispatch -------------------------------------------------

    /// Forward a page-local row to the host's handler for the action
    /// Returns false for out-of-range rows or unregistered handlers
    pub fn dispatch_row_action(&self, action: RowAction, index: usize) -> bool {
        let Some(row) = self.page_row(index) else {
            debug!("Ignoring {:?} on out-of-range row {}", action, index);
            return false;
        };
        self.actions.dispatch(action, row, index)
    }

    /// Forward the selected rows to the host's bulk handler
    pub fn dispatch_bulk_action(&self) -> bool {
        let rows = self.selected_rows();
        self.actions.dispatch_bulk(&rows)
    }

    // --- internals -------------------------------------------------------

    fn page_row(&self, page_local: usize) -> Option<&DataRow> {
        let (start, end) = self.page_bounds();
        let pos = start + page_local;
        if pos >= end {
            return None;
        }
        self.source.rows.get(self.visible_rows[pos])
    }

    fn page_bounds(&self) -> (usize, usize) {
        let count = self.visible_rows.len();
        if !self.options.pagination.enabled {
            return (0, count);
        }

        let size = self.state.page_size;
        let start = ((self.state.current_page - 1) * size).min(count);
        let end = (start + size).min(count);
        (start, end)
    }

    /// Re-derive the visible index list from the current state
    ///
    /// Runs after every filter or sort transition. The page is clamped so a
    /// shrinking filter can never leave the view past the last page, and the
    /// selection is cleared because its page-local indices no longer refer
    /// to the same rows.
    fn recompute(&mut self) {
        let mut rows = if self.options.filtering.enabled && !self.state.filter.is_empty() {
            self.row_filter.matching_rows(&self.source, &self.state.filter)
        } else {
            (0..self.source.row_count()).collect()
        };

        if self.options.sorting.enabled {
            if let Some(col) = self.state.sort.column {
                let source = &self.source;
                let ascending = self.state.sort.order.is_ascending();
                // Stable sort; descending reverses the comparator, not the
                // output, so ties keep their ascending relative order
                rows.sort_by(|&a, &b| {
                    let cmp =
                        compare_optional_values(source.get_value(a, col), source.get_value(b, col));
                    if ascending {
                        cmp
                    } else {
                        cmp.reverse()
                    }
                });
            }
        }

        self.visible_rows = rows;

        let total = self.total_pages();
        if self.state.current_page > total {
            self.state.current_page = total;
        }
        self.state.selection.clear();
    }
}

impl DataProvider for TableView {
    fn get_row(&self, index: usize) -> Option<Vec<String>> {
        if index >= self.page_len() {
            return None;
        }
        Some(
            (0..self.source.column_count())
                .map(|col| self.render_cell(index, col))
                .collect(),
        )
    }

    fn get_column_names(&self) -> Vec<String> {
        self.source.column_titles()
    }

    fn get_row_count(&self) -> usize {
        self.page_len()
    }

    fn get_column_count(&self) -> usize {
        self.source.column_count()
    }
}
