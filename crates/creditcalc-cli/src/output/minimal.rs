use serde_json::Value;
use std::io::{self, Write};

/// Fields tried in order when picking the headline number.
const PRIORITY_KEYS: [&str; 4] = ["payment", "principal", "periods", "overpayment"];

/// Write just the key answer value from the output.
pub fn write_minimal<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", headline(value))
}

/// The value solved for; schedules fall through to their overpayment.
fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
