use serde_json::Value;

use super::cell_text;

/// Fields that answer the question a command was asked, most specific first.
const PRIORITY_KEYS: [&str; 6] = [
    "monthly_installment_display",
    "monthly_installment",
    "formatted",
    "amount",
    "message",
    "token_stored",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            for key in PRIORITY_KEYS {
                if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                    return cell_text(val);
                }
            }
            match map.iter().next() {
                Some((key, val)) => format!("{}: {}", key, cell_text(val)),
                None => String::new(),
            }
        }
        // one id per line for lists
        Value::Array(rows) => rows
            .iter()
            .map(|r| r.get("_id").map(cell_text).unwrap_or_else(|| cell_text(r)))
            .collect::<Vec<_>>()
            .join("\n"),
        other => cell_text(other),
    }
}
