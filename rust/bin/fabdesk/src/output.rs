//! Terminal rendering of records and summaries.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

impl Format {
    /// Flag value if given, else the config file's, else table.
    pub fn resolve(flag: Option<Format>, configured: Option<&str>) -> Result<Format> {
        match (flag, configured) {
            (Some(f), _) => Ok(f),
            (None, Some(s)) => Format::from_str(s, true)
                .map_err(|_| anyhow::anyhow!("config: unknown output format '{}'", s)),
            (None, None) => Ok(Format::Table),
        }
    }
}

/// One cell of a table.
fn cell(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) if s.is_empty() => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => format!("[{} items]", items.len()),
        Some(Value::Object(_)) => "{..}".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Aligned columns with a header row.
pub fn table(out: &mut dyn Write, columns: &[&str], rows: &[Value]) -> Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| columns.iter().map(|c| cell(r.get(*c))).collect())
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain([c.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns.iter().map(|c| c.to_uppercase()).collect();
    write_line(out, &widths, &header)?;
    for row in &cells {
        write_line(out, &widths, row)?;
    }
    Ok(())
}

fn write_line(out: &mut dyn Write, widths: &[usize], values: &[String]) -> Result<()> {
    let padded: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(v, w)| format!("{}{}", v, " ".repeat(w.saturating_sub(v.chars().count()))))
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())?;
    Ok(())
}

/// Any JSON value, shaped for reading: arrays of objects become tables,
/// objects become indented `key: value` lines.
pub fn describe(out: &mut dyn Write, value: &Value, indent: usize) -> Result<()> {
    let pad = " ".repeat(indent);
    match value {
        Value::Array(items) if items.first().is_some_and(Value::is_object) => {
            let columns: Vec<&str> = items[0]
                .as_object()
                .map(|o| o.keys().map(String::as_str).collect())
                .unwrap_or_default();
            let mut buf = Vec::new();
            table(&mut buf, &columns, items)?;
            for l in String::from_utf8_lossy(&buf).lines() {
                writeln!(out, "{}{}", pad, l)?;
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                if v.is_object() || v.as_array().is_some_and(|a| a.first().is_some_and(Value::is_object)) {
                    writeln!(out, "{}{}:", pad, k)?;
                    describe(out, v, indent + 2)?;
                } else {
                    writeln!(out, "{}{}: {}", pad, k, cell(Some(v)))?;
                }
            }
        }
        other => writeln!(out, "{}{}", pad, cell(Some(other)))?,
    }
    Ok(())
}

/// Print `value` in the chosen format.
pub fn emit(out: &mut dyn Write, format: Format, value: &Value) -> Result<()> {
    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        Format::Table => describe(out, value, 0)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn table_aligns_and_marks_blanks() {
        let rows = vec![
            json!({"id": 1, "name": "A", "email": ""}),
            json!({"id": 12, "name": "Longer name"}),
        ];
        let text = render(|out| table(out, &["id", "name", "email"], &rows));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID  NAME         EMAIL");
        assert_eq!(lines[1], "1   A            -");
        assert_eq!(lines[2], "12  Longer name  -");
    }

    #[test]
    fn nested_arrays_are_summarized() {
        let rows = vec![json!({"id": 1, "items": [{"materialId": 1}, {"materialId": 2}]})];
        let text = render(|out| table(out, &["id", "items"], &rows));
        assert!(text.contains("[2 items]"));
    }

    #[test]
    fn describe_object() {
        let v = json!({"headcount": 4, "departments": {"生产部": {"headcount": 2}}});
        let text = render(|out| describe(out, &v, 0));
        assert!(text.contains("headcount: 4"));
        assert!(text.contains("departments:\n  生产部:\n    headcount: 2"));
    }

    #[test]
    fn format_resolution() {
        assert_eq!(Format::resolve(None, None).unwrap(), Format::Table);
        assert_eq!(Format::resolve(None, Some("JSON")).unwrap(), Format::Json);
        assert_eq!(Format::resolve(Some(Format::Table), Some("json")).unwrap(), Format::Table);
        assert!(Format::resolve(None, Some("yaml")).is_err());
    }
}
