pub mod config;
pub mod data;
pub mod view;

pub use config::ViewOptions;
pub use data::data_provider::DataProvider;
pub use data::datatable::{CellRenderer, DataColumn, DataRow, DataTable, DataType, DataValue};
pub use view::actions::{ActionRegistry, RowAction};
pub use view::filter::FilterMode;
pub use view::state::{SortOrder, SortState};
pub use view::table_view::{RecordRange, TableView};
