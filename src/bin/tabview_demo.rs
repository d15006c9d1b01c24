// TableView demo binary - for exercising the view engine in isolation
// Run with: cargo run --bin tabview-demo

use std::sync::Arc;

use tabview::view::actions::ActionRegistry;
use tabview::{DataColumn, DataRow, DataTable, DataValue, RowAction, TableView, ViewOptions};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create test data
    let mut table = DataTable::new("demo");

    table.add_column(DataColumn::new("id").with_title("ID"));
    table.add_column(DataColumn::new("name").with_title("Name"));
    table.add_column(DataColumn::new("amount").with_title("Amount"));
    table.add_column(DataColumn::new("category").with_title("Category"));

    let rows = vec![
        (1, "Alice", 100.50, "Sales"),
        (2, "Bob", 200.75, "Marketing"),
        (3, "Charlie", 150.25, "Sales"),
        (4, "David", 300.00, "Engineering"),
        (5, "Eve", 175.50, "Marketing"),
        (6, "Frank", 250.00, "Sales"),
        (7, "Grace", 180.00, "Engineering"),
    ];

    for (id, name, amount, category) in rows {
        table
            .add_row(DataRow::new(vec![
                DataValue::Integer(id),
                DataValue::String(name.to_string()),
                DataValue::Float(amount),
                DataValue::String(category.to_string()),
            ]))
            .unwrap();
    }
    table.infer_column_types();

    let mut view = TableView::new(Arc::new(table), ViewOptions::with_page_size(3)).with_actions(
        ActionRegistry::new()
            .on_view(|row, idx| println!("  -> view row {}: {:?}", idx, row.values))
            .on_bulk(|rows| println!("  -> bulk action over {} rows", rows.len())),
    );

    println!("=== Initial state ===");
    print_page(&view);

    println!("\n=== Sort by amount ===");
    view.set_sort("amount");
    print_page(&view);

    println!("\n=== Sort by amount again (descending) ===");
    view.set_sort("amount");
    print_page(&view);

    println!("\n=== Filter: 'sales' ===");
    view.set_global_filter("sales");
    print_page(&view);

    println!("\n=== Clear filters, page 3 ===");
    view.clear_filters();
    view.set_page(3);
    print_page(&view);

    println!("\n=== Select all on this page, dispatch bulk ===");
    view.select_all(true);
    println!("selected: {:?}", view.selected_indices());
    view.dispatch_bulk_action();

    println!("\n=== Row action on page row 0 ===");
    view.dispatch_row_action(RowAction::View, 0);
}

fn print_page(view: &TableView) {
    let range = view.record_range();
    println!(
        "page {}/{} - showing {} to {} of {}",
        view.current_page(),
        view.total_pages(),
        range.start,
        range.end,
        range.total
    );
    for (i, row) in view.visible_rows().iter().enumerate() {
        let cells: Vec<String> = row.values.iter().map(|v| v.to_string()).collect();
        println!("  [{}] {}", i, cells.join(", "));
    }
}
