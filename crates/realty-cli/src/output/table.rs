use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use realty_core::format::truncate;

use super::{cell_text, column_keys};
use crate::config::DisplayConfig;

/// Render as a table. Calculator output shows its `result` block followed by
/// any warnings; lists become one row per record.
pub fn print_table(value: &Value, display: &DisplayConfig) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map, display);
            } else {
                println!("{}", field_table(map, display));
            }
        }
        Value::Array(rows) => print_rows(rows, display),
        _ => println!("{}", cell_text(value)),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>, display: &DisplayConfig) {
    match result {
        Value::Object(res) => println!("{}", field_table(res, display)),
        _ => println!("{}", field_table(envelope, display)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_table(map: &Map<String, Value>, display: &DisplayConfig) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), truncate(&cell_text(val), display.truncate_width)]);
    }
    builder.build()
}

fn print_rows(rows: &[Value], display: &DisplayConfig) {
    if rows.is_empty() {
        println!("(no records)");
        return;
    }
    if !rows.iter().all(Value::is_object) {
        for row in rows {
            println!("{}", truncate(&cell_text(row), display.truncate_width));
        }
        return;
    }

    println!("{}", rows_table(rows, display));
}

fn rows_table(rows: &[Value], display: &DisplayConfig) -> Table {
    let headers = column_keys(rows);
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| {
                row.get(h.as_str())
                    .map(|v| truncate(&cell_text(v), display.truncate_width))
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(cells);
    }
    builder.build()
}
