//! Row action dispatch
//!
//! The view engine never performs network calls or data mutation itself: row
//! and bulk actions are forwarded to host-supplied callbacks together with
//! the row and its page-local index. Panics raised inside a callback are the
//! host's to deal with.

use std::fmt;

use crate::data::datatable::DataRow;

/// Per-row actions a host can wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

pub type RowActionHandler = Box<dyn Fn(&DataRow, usize)>;
pub type BulkActionHandler = Box<dyn Fn(&[(usize, DataRow)])>;

/// Holds the callbacks registered by the host
#[derive(Default)]
pub struct ActionRegistry {
    view: Option<RowActionHandler>,
    edit: Option<RowActionHandler>,
    delete: Option<RowActionHandler>,
    bulk: Option<BulkActionHandler>,
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("view", &self.view.is_some())
            .field("edit", &self.edit.is_some())
            .field("delete", &self.delete.is_some())
            .field("bulk", &self.bulk.is_some())
            .finish()
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_view(mut self, handler: impl Fn(&DataRow, usize) + 'static) -> Self {
        self.view = Some(Box::new(handler));
        self
    }

    pub fn on_edit(mut self, handler: impl Fn(&DataRow, usize) + 'static) -> Self {
        self.edit = Some(Box::new(handler));
        self
    }

    pub fn on_delete(mut self, handler: impl Fn(&DataRow, usize) + 'static) -> Self {
        self.delete = Some(Box::new(handler));
        self
    }

    pub fn on_bulk(mut self, handler: impl Fn(&[(usize, DataRow)]) + 'static) -> Self {
        self.bulk = Some(Box::new(handler));
        self
    }

    /// Forward a row to the matching handler
    /// Returns whether a handler was registered and ran
    pub fn dispatch(&self, action: RowAction, row: &DataRow, page_local_index: usize) -> bool {
        let handler = match action {
            RowAction::View => self.view.as_ref(),
            RowAction::Edit => self.edit.as_ref(),
            RowAction::Delete => self.delete.as_ref(),
        };

        match handler {
            Some(handler) => {
                handler(row, page_local_index);
                true
            }
            None => false,
        }
    }

    /// Forward the selected rows to the bulk handler
    pub fn dispatch_bulk(&self, rows: &[(usize, DataRow)]) -> bool {
        match self.bulk.as_ref() {
            Some(handler) => {
                handler(rows);
                true
            }
            None => false,
        }
    }
}
