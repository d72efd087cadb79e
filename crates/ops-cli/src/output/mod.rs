use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, ui::prefs().term_width),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize + ?Sized>(
    value: &T,
    max_width: Option<usize>,
) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(match value {
        Value::Array(items) => rows_table(&items, max_width),
        // A listing envelope (e.g. a submissions page) renders its rows, with
        // the scalar fields as a footer.
        Value::Object(map) if map.values().any(Value::is_array) => {
            let mut footer = Vec::new();
            let mut rows = Vec::new();
            for (key, value) in map {
                match value {
                    Value::Array(items) => rows = items,
                    scalar => footer.push(format!("{key}: {}", cell(&scalar))),
                }
            }
            let mut out = rows_table(&rows, max_width);
            if !footer.is_empty() {
                out.push('\n');
                out.push_str(&footer.join("  "));
            }
            out
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            table::render(&["field", "value"], &rows, max_width)
        }
        Value::Null => String::from("(none)"),
        scalar => cell(&scalar),
    })
}

/// One row per object; columns are the union of keys in first-seen order.
fn rows_table(items: &[Value], max_width: Option<usize>) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let mut headers = Vec::<String>::new();
    for key in items.iter().filter_map(Value::as_object).flat_map(|map| map.keys()) {
        if !headers.contains(key) {
            headers.push(key.clone());
        }
    }

    if headers.is_empty() {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render(&["value"], &rows, max_width);
    }

    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<String>>()
        })
        .collect::<Vec<_>>();
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    table::render(&header_refs, &rows, max_width)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        // Nested answers and schemas stay compact on one line.
        other => other.to_string(),
    }
}
