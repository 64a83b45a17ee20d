//! Generic record commands.
//!
//! `fabdesk list customers`, `fabdesk create transactions --set amount=10`, etc.

use std::io::Write;
use std::path::Path;

use anyhow::{Result, bail};
use fabdesk_registry::{Kind, Registry};
use fabdesk_store::{Filter, Query};
use serde_json::{Map, Value};
use tracing::info;

use crate::output::{self, Format};

/// Build the field map of a create or update: `--json` first, then each
/// `--set key=value` on top. Values that look like JSON arrays or objects
/// are parsed as such; everything else stays text and is coerced on commit.
pub fn fields(json_body: Option<&str>, sets: &[String]) -> Result<Map<String, Value>> {
    let mut map = match json_body {
        Some(text) => match serde_json::from_str(text) {
            Ok(Value::Object(m)) => m,
            Ok(_) => bail!("--json must be an object"),
            Err(e) => bail!("Invalid JSON: {}", e),
        },
        None => Map::new(),
    };
    for set in sets {
        let Some((key, raw)) = set.split_once('=') else {
            bail!("--set '{}': expected key=value", set);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("--set '{}': empty field name", set);
        }
        let value = if raw.starts_with('[') || raw.starts_with('{') {
            serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("--set {}: {}", key, e))?
        } else {
            Value::String(raw.to_string())
        };
        map.insert(key.to_string(), value);
    }
    Ok(map)
}

pub fn query(term: Option<&str>, filters: &[String]) -> Result<Query> {
    let mut q = Query::new();
    if let Some(t) = term {
        q = q.with_term(t);
    }
    for f in filters {
        q = q.with_filter(Filter::parse(f)?);
    }
    Ok(q)
}

pub fn list(out: &mut dyn Write, reg: &Registry, kind: Kind, query: &Query, related: bool, format: Format) -> Result<()> {
    let rows = reg.list_json(kind, query, related)?;
    match format {
        Format::Json => output::emit(out, format, &Value::Array(rows)),
        Format::Table => {
            output::table(out, &kind.columns(), &rows)?;
            writeln!(out, "({} {})", rows.len(), kind)?;
            Ok(())
        }
    }
}

pub fn get(out: &mut dyn Write, reg: &Registry, kind: Kind, id: u64, format: Format) -> Result<()> {
    output::emit(out, format, &reg.get_json(kind, id)?)
}

pub fn create(
    out: &mut dyn Write,
    reg: &mut Registry,
    kind: Kind,
    fields: &Map<String, Value>,
    format: Format,
) -> Result<()> {
    let record = reg.create_json(kind, fields)?;
    info!("{} {} created", kind.label(), record["id"]);
    output::emit(out, format, &record)
}

pub fn update(
    out: &mut dyn Write,
    reg: &mut Registry,
    kind: Kind,
    id: u64,
    fields: &Map<String, Value>,
    format: Format,
) -> Result<()> {
    if fields.is_empty() {
        bail!("Nothing to update; pass --set key=value or --json.");
    }
    let record = reg.update_json(kind, id, fields)?;
    info!("{} {} updated", kind.label(), id);
    output::emit(out, format, &record)
}

pub fn delete(out: &mut dyn Write, reg: &mut Registry, kind: Kind, id: u64) -> Result<()> {
    reg.delete_json(kind, id)?;
    writeln!(out, "{} {} deleted.", kind.label(), id)?;
    Ok(())
}

/// Write a collection as CSV to `dest`, or to `out` without one.
pub fn export(out: &mut dyn Write, reg: &Registry, kind: Kind, dest: Option<&Path>) -> Result<()> {
    let csv = reg.export_kind(kind)?;
    match dest {
        Some(path) => {
            std::fs::write(path, csv.as_bytes())?;
            info!("{} exported to {}", kind, path.display());
        }
        None => out.write_all(csv.as_bytes())?,
    }
    Ok(())
}

/// Import CSV rows as new records. Refused rows are listed, not fatal.
pub fn import(out: &mut dyn Write, reg: &mut Registry, kind: Kind, src: &Path, format: Format) -> Result<()> {
    let text = std::fs::read_to_string(src).map_err(|e| anyhow::anyhow!("{}: {}", src.display(), e))?;
    let report = reg.import_kind(kind, &text)?;
    match format {
        Format::Json => {
            let rejected: Vec<Value> = report
                .rejected
                .iter()
                .map(|r| serde_json::json!({"row": r.row, "error": r.error}))
                .collect();
            output::emit(
                out,
                format,
                &serde_json::json!({"imported": report.imported, "rejected": rejected}),
            )
        }
        Format::Table => {
            writeln!(out, "Imported {} {}.", report.imported.len(), kind)?;
            for r in &report.rejected {
                writeln!(out, "  row {}: {}", r.row, r.error)?;
            }
            Ok(())
        }
    }
}
