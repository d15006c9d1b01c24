//! Build a DataTable from JSON rows or delimited files
//!
//! These helpers populate the row collection the view engine derives from.
//! The engine itself never performs I/O; a host loads data up front and hands
//! the finished table over.

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::data::datatable::{DataColumn, DataRow, DataTable, DataValue};

/// Build a DataTable from an array of JSON objects
///
/// Columns come from the keys of the first object; later objects missing a
/// key contribute a Null cell for it. Column types are inferred after load.
pub fn table_from_json_rows(rows: &[JsonValue], table_name: &str) -> Result<DataTable> {
    let mut table = DataTable::new(table_name);

    let Some(first_row) = rows.first() else {
        return Ok(table);
    };

    if let Some(obj) = first_row.as_object() {
        for key in obj.keys() {
            table.add_column(DataColumn::new(key.clone()));
        }

        for json_row in rows {
            if let Some(row_obj) = json_row.as_object() {
                // Pull values in column order so every row lines up
                let values: Vec<DataValue> = table
                    .columns
                    .iter()
                    .map(|column| {
                        row_obj
                            .get(&column.key)
                            .map(json_value_to_data_value)
                            .unwrap_or(DataValue::Null)
                    })
                    .collect();

                table.add_row(DataRow::new(values))?;
            }
        }

        table.infer_column_types();
    } else {
        // Handle non-object JSON (single values)
        table.add_column(DataColumn::new("value"));
        for json_value in rows {
            let value = json_value_to_data_value(json_value);
            table.add_row(DataRow::new(vec![value]))?;
        }
        table.infer_column_types();
    }

    debug!(
        "Built DataTable '{}' with {} columns and {} rows",
        table.name,
        table.column_count(),
        table.row_count()
    );

    Ok(table)
}

/// Load a JSON file containing an array of objects into a DataTable
pub fn load_json_to_table<P: AsRef<Path>>(path: P, table_name: &str) -> Result<DataTable> {
    let path = path.as_ref();
    info!("Loading {} into DataTable", path.display());

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let json: JsonValue = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;

    let rows = json
        .as_array()
        .with_context(|| format!("{} does not contain a JSON array", path.display()))?;

    let mut table = table_from_json_rows(rows, table_name)?;
    table
        .metadata
        .insert("source".to_string(), path.display().to_string());

    Ok(table)
}

/// Load a CSV file into a DataTable
///
/// Each field gets a typed value via parse-attempt fallthrough; column types
/// are inferred once the whole file is in.
pub fn load_csv_to_table<P: AsRef<Path>>(path: P, table_name: &str) -> Result<DataTable> {
    let path = path.as_ref();
    info!("Loading {} into DataTable", path.display());

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    // Get headers and create columns
    let headers = reader.headers()?.clone(); // Clone to release the borrow
    let mut table = DataTable::new(table_name);

    for header in headers.iter() {
        table.add_column(DataColumn::new(header.to_string()));
    }

    for result in reader.records() {
        let record = result?;
        let mut values = Vec::with_capacity(headers.len());

        for field in record.iter() {
            values.push(csv_field_to_data_value(field));
        }

        table.add_row(DataRow::new(values))?;
    }

    // Infer column types from the data
    table.infer_column_types();
    table
        .metadata
        .insert("source".to_string(), path.display().to_string());

    info!(
        "CSV load complete: {} rows, {} columns",
        table.row_count(),
        table.column_count()
    );

    Ok(table)
}

fn csv_field_to_data_value(field: &str) -> DataValue {
    if field.is_empty() {
        DataValue::Null
    } else if let Ok(b) = field.parse::<bool>() {
        DataValue::Boolean(b)
    } else if let Ok(i) = field.parse::<i64>() {
        DataValue::Integer(i)
    } else if let Ok(f) = field.parse::<f64>() {
        DataValue::Float(f)
    } else if field.contains('-') && field.len() >= 8 && field.len() <= 30 {
        // Check for date-like strings
        DataValue::DateTime(field.to_string())
    } else {
        DataValue::String(field.to_string())
    }
}

fn json_value_to_data_value(json: &JsonValue) -> DataValue {
    match json {
        JsonValue::Null => DataValue::Null,
        JsonValue::Bool(b) => DataValue::Boolean(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                DataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                DataValue::Float(f)
            } else {
                DataValue::String(n.to_string())
            }
        }
        JsonValue::String(s) => {
            // Try to detect if it's a date/time
            if s.contains('-') && s.len() >= 8 && s.len() <= 30 {
                DataValue::DateTime(s.clone())
            } else {
                DataValue::String(s.clone())
            }
        }
        JsonValue::Array(_) | JsonValue::Object(_) => {
            // Store complex types as JSON string
            DataValue::String(json.to_string())
        }
    }
}
