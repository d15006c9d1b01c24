use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use tabview::{DataColumn, DataRow, DataTable, DataValue, TableView, ViewOptions};

fn create_test_data(rows: usize) -> DataTable {
    let mut table = DataTable::new("bench");

    table.add_column(DataColumn::new("book"));
    table.add_column(DataColumn::new("value"));
    table.add_column(DataColumn::new("status"));

    let book_values = vec![
        "Commodities Trading",
        "Equity Trading",
        "FX Trading",
        "Bond Trading",
        "Derivatives",
        "Options",
        "Futures",
        "ETF Trading",
        "Structured Products",
        "Money Markets",
    ];

    for i in 0..rows {
        let book = book_values[i % book_values.len()].to_string();
        let row = DataRow::new(vec![
            DataValue::String(book),
            DataValue::Integer(i as i64),
            DataValue::String(format!("STATUS_{}", i % 5)),
        ]);
        table.add_row(row).unwrap();
    }

    table
}

fn benchmark_global_filter(c: &mut Criterion) {
    let table_10k = Arc::new(create_test_data(10_000));
    let table_50k = Arc::new(create_test_data(50_000));
    let table_100k = Arc::new(create_test_data(100_000));

    let mut group = c.benchmark_group("global_filter");

    group.bench_function("10k_rows", |b| {
        b.iter(|| {
            let mut view = TableView::new(table_10k.clone(), ViewOptions::default());
            view.set_global_filter(black_box("trading"));
            black_box(view.filtered_count())
        })
    });

    group.bench_function("50k_rows", |b| {
        b.iter(|| {
            let mut view = TableView::new(table_50k.clone(), ViewOptions::default());
            view.set_global_filter(black_box("trading"));
            black_box(view.filtered_count())
        })
    });

    group.bench_function("100k_rows", |b| {
        b.iter(|| {
            let mut view = TableView::new(table_100k.clone(), ViewOptions::default());
            view.set_global_filter(black_box("trading"));
            black_box(view.filtered_count())
        })
    });

    group.finish();
}

fn benchmark_sort(c: &mut Criterion) {
    let table_10k = Arc::new(create_test_data(10_000));
    let table_100k = Arc::new(create_test_data(100_000));

    let mut group = c.benchmark_group("sort");

    group.bench_function("10k_rows_by_string", |b| {
        b.iter(|| {
            let mut view = TableView::new(table_10k.clone(), ViewOptions::default());
            view.set_sort(black_box("book"));
            black_box(view.visible_rows())
        })
    });

    group.bench_function("100k_rows_by_integer", |b| {
        b.iter(|| {
            let mut view = TableView::new(table_100k.clone(), ViewOptions::default());
            view.set_sort(black_box("value"));
            black_box(view.visible_rows())
        })
    });

    group.finish();
}

fn benchmark_filter_sort_page(c: &mut Criterion) {
    let table_50k = Arc::new(create_test_data(50_000));

    c.bench_function("filter_sort_page_50k", |b| {
        b.iter(|| {
            let mut view = TableView::new(table_50k.clone(), ViewOptions::with_page_size(25));
            view.set_global_filter(black_box("trading"));
            view.set_sort(black_box("value"));
            view.set_page(black_box(40));
            black_box(view.visible_rows())
        })
    });
}

criterion_group!(
    benches,
    benchmark_global_filter,
    benchmark_sort,
    benchmark_filter_sort_page
);
criterion_main!(benches);
