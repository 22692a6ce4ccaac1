use colored::Colorize;
use serde_json::{Map, Value};
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let Value::Object(envelope) = value else {
        return writeln!(out, "{}", value);
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => {
            for table in result_tables(result) {
                writeln!(out, "{}", table)?;
            }
        }
        _ => writeln!(out, "{}", field_table(envelope))?,
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\n{}", "Warnings:".yellow().bold())?;
            for w in warnings {
                if let Value::String(s) = w {
                    writeln!(out, "  - {}", s)?;
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        writeln!(out, "\n{} {}", "Methodology:".bold(), meth)?;
    }
    Ok(())
}

/// A field/value table of the scalar fields, then one table per list of
/// records (the monthly schedule).
fn result_tables(result: &Map<String, Value>) -> Vec<String> {
    let scalars: Map<String, Value> = result
        .iter()
        .filter(|(_, v)| !v.is_array())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let mut tables = Vec::new();
    for val in result.values() {
        if let Value::Array(rows) = val {
            tables.push(records_table(rows));
        }
    }
    tables.push(field_table(&scalars));
    tables
}

fn field_table(map: &Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    Table::from(builder).to_string()
}

fn records_table(rows: &[Value]) -> String {
    let Some(Value::Object(first)) = rows.first() else {
        return rows.iter().map(format_value).collect::<Vec<_>>().join("\n");
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let cells: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(cells);
        }
    }

    Table::from(builder).to_string()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
