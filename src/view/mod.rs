//! View derivation layer
//!
//! A TableView owns its ViewState and derives the visible page from the
//! source table on every transition.

pub mod actions;
pub mod filter;
pub mod state;
pub mod table_view;
