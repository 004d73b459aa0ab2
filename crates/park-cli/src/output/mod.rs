use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_as_table(value, ui::prefs().table_color),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_as_table<T: Serialize>(value: &T, color: bool) -> anyhow::Result<String> {
    let options = table::TableOptions { color };
    let value = serde_json::to_value(value)?;

    match value {
        Value::Array(items) => Ok(render_rows(&items, options)),
        Value::Object(map) => {
            let rows = flatten("", &Value::Object(map))
                .into_iter()
                .map(|(key, value)| vec![key, value])
                .collect::<Vec<_>>();
            Ok(table::render_table(&["field", "value"], &rows, options))
        }
        scalar => Ok(value_to_cell(&scalar)),
    }
}

/// One row per array element, one column per flattened field in first-seen order.
fn render_rows(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let flattened = items
        .iter()
        .map(|item| flatten("", item))
        .collect::<Vec<_>>();

    let mut headers = Vec::<String>::new();
    for row in &flattened {
        for (key, _) in row {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = flattened
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| {
                    row.iter()
                        .find(|(key, _)| key == header)
                        .map_or_else(|| String::from("-"), |(_, value)| value.clone())
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    table::render_table(&header_refs, &rows, options)
}

/// Flatten nested objects into `parent.child` keys.
fn flatten(prefix: &str, value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .flat_map(|(key, value)| {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&key, value)
            })
            .collect(),
        other => vec![(prefix.to_string(), value_to_cell(other))],
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::{render, table};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Inner {
        id: i64,
        category: &'static str,
    }

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        spot: Inner,
        exit_time: Option<&'static str>,
    }

    fn example() -> Example {
        Example {
            id: "tkt-0001",
            spot: Inner {
                id: 2,
                category: "car",
            },
            exit_time: None,
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&example(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "tkt-0001");
        assert_eq!(parsed["spot"]["id"], 2);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&example(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }

    #[test]
    fn table_render_flattens_nested_objects() {
        let out = render(&example(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("field")));
        assert!(out.contains("spot.category"));
        assert!(out.contains("exit_time"));
    }

    #[test]
    fn table_render_for_array_uses_columns() {
        let out = render(&vec![example(), example()], OutputFormat::Table).expect("render");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("spot.id"));
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let empty: Vec<Example> = Vec::new();
        assert_eq!(render(&empty, OutputFormat::Table).unwrap(), "(no rows)");
    }

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let rows = vec![
            vec!["1".to_string(), "car".to_string(), "true".to_string()],
            vec!["12".to_string(), "bike".to_string(), "false".to_string()],
        ];
        let out = table::render_table(
            &["id", "category", "available"],
            &rows,
            table::TableOptions { color: false },
        );
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "id  category  available");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], " 1  car       true     ");
    }
}
