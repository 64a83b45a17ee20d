//! Spreadsheet (CSV) export and import of an entity store.
//!
//! Export writes the entity's columns as a header row, then one row per
//! record. Cells that a spreadsheet would evaluate as a formula are
//! prefixed with `'`, and import strips that prefix again.
//!
//! Import never appends rows directly: every row goes through [`commit`] on
//! a fresh create session, so it gets a new id and full validation. Rows
//! that fail are reported, not stored.

use fabdesk_core::ServiceError;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::commit::commit;
use crate::entity::Entity;
use crate::field::value_text;
use crate::refs::ReferenceCheck;
use crate::session::EditSession;
use crate::store::EntityStore;

#[derive(Error, Debug, PartialEq)]
pub enum SheetError {
    #[error("sheet is empty (no header row)")]
    Empty,

    #[error("header column {0} is empty")]
    EmptyHeader(usize),

    #[error("header column '{0}' appears twice")]
    DuplicateHeader(String),

    #[error("unterminated quoted cell starting on line {0}")]
    UnterminatedQuote(usize),
}

impl From<SheetError> for ServiceError {
    fn from(e: SheetError) -> Self {
        ServiceError::Validation(format!("import: {}", e))
    }
}

// ── Export ──────────────────────────────────────────────────────────

/// Columns written for `T`: id, the form fields, then the stamps.
pub fn columns<T: Entity>() -> Vec<&'static str> {
    let mut cols = vec!["id"];
    cols.extend(T::FIELDS.iter().map(|f| f.name));
    cols.extend(["createdAt", "updatedAt"]);
    cols
}

/// Render records as CSV text.
pub fn export<T: Entity>(records: &[T]) -> Result<String, ServiceError> {
    let cols = columns::<T>();
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(cols.iter().map(|c| csv_escape(c)).collect::<Vec<_>>().join(","));
    for record in records {
        let doc = serde_json::to_value(record)
            .map_err(|e| ServiceError::Internal(format!("serialize {}: {}", T::LABEL, e)))?;
        let line = cols
            .iter()
            .map(|c| csv_escape(&doc.get(*c).map(value_text).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    let mut text = lines.join("\n");
    text.push('\n');
    Ok(text)
}

fn should_neutralize(value: &str) -> bool {
    matches!(
        value.trim_start().chars().next(),
        Some('=') | Some('+') | Some('-') | Some('@')
    )
}

/// Quote cells a spreadsheet would evaluate. Cells that already start with
/// the quote get one more, so import can always strip exactly one.
fn neutralize_formula(value: &str) -> String {
    if should_neutralize(value) || value.starts_with('\'') {
        format!("'{value}")
    } else {
        value.to_string()
    }
}

fn csv_escape(value: &str) -> String {
    let safe = neutralize_formula(value);
    if safe.contains(',') || safe.contains('"') || safe.contains('\n') || safe.contains('\r') {
        format!("\"{}\"", safe.replace('"', "\"\""))
    } else {
        safe
    }
}

/// Undo [`neutralize_formula`].
fn restore_formula(value: &str) -> &str {
    value.strip_prefix('\'').unwrap_or(value)
}

// ── Parse ───────────────────────────────────────────────────────────

/// A parsed CSV document.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub header: Vec<String>,
    pub rows: Vec<SheetRow>,
}

/// One data row. `row` is the line the row starts on (the header is line 1).
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub row: usize,
    pub cells: Vec<String>,
}

impl Sheet {
    /// Parse RFC 4180-style CSV. Blank lines are skipped; a UTF-8 BOM is
    /// tolerated.
    pub fn parse(text: &str) -> Result<Self, SheetError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = split_records(text)?
            .into_iter()
            .filter(|r| !(r.cells.len() == 1 && r.cells[0].trim().is_empty()));

        let header_row = records.next().ok_or(SheetError::Empty)?;
        let mut header: Vec<String> = Vec::with_capacity(header_row.cells.len());
        for (i, name) in header_row.cells.iter().enumerate() {
            let name = name.trim();
            if name.is_empty() {
                return Err(SheetError::EmptyHeader(i + 1));
            }
            if header.iter().any(|h| h == name) {
                return Err(SheetError::DuplicateHeader(name.to_string()));
            }
            header.push(name.to_string());
        }
        Ok(Sheet {
            header,
            rows: records.collect(),
        })
    }

    /// Turn a row into a raw form object keyed by header name.
    ///
    /// Missing trailing cells count as blank. Extra non-blank cells beyond
    /// the header are an error for that row.
    pub fn object(&self, row: &SheetRow) -> Result<Map<String, Value>, String> {
        if let Some(extra) = row.cells.get(self.header.len()..) {
            if extra.iter().any(|c| !c.trim().is_empty()) {
                return Err(format!(
                    "row has {} cells, header has {}",
                    row.cells.len(),
                    self.header.len()
                ));
            }
        }
        Ok(self
            .header
            .iter()
            .zip(row.cells.iter())
            .map(|(k, v)| (k.clone(), Value::String(restore_formula(v).to_string())))
            .collect())
    }
}

fn split_records(text: &str) -> Result<Vec<SheetRow>, SheetError> {
    let mut rows = Vec::new();
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut quote_start = 0;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    cell.push(c);
                }
                _ => cell.push(c),
            }
            continue;
        }
        match c {
            '"' if cell.is_empty() => {
                in_quotes = true;
                quote_start = line;
            }
            ',' => cells.push(std::mem::take(&mut cell)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                cells.push(std::mem::take(&mut cell));
                rows.push(SheetRow {
                    row: row_start,
                    cells: std::mem::take(&mut cells),
                });
                line += 1;
                row_start = line;
            }
            _ => cell.push(c),
        }
    }
    if in_quotes {
        return Err(SheetError::UnterminatedQuote(quote_start));
    }
    if !cell.is_empty() || !cells.is_empty() {
        cells.push(cell);
        rows.push(SheetRow {
            row: row_start,
            cells,
        });
    }
    Ok(rows)
}

// ── Import ──────────────────────────────────────────────────────────

/// A row the import refused.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub row: usize,
    pub error: String,
}

/// Outcome of an import: ids of the created records and the refused rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub imported: Vec<u64>,
    pub rejected: Vec<RejectedRow>,
}

/// Import CSV text into `store`, one create commit per row.
pub fn import<T: Entity>(
    store: &mut EntityStore<T>,
    text: &str,
    refs: &dyn ReferenceCheck,
) -> Result<ImportReport, SheetError> {
    let sheet = Sheet::parse(text)?;
    let mut report = ImportReport::default();
    let mut session = EditSession::<T>::new();

    for row in &sheet.rows {
        let outcome = sheet.object(row).and_then(|obj| {
            session.open_create();
            session.stage_all(&obj).map_err(|e| e.to_string())?;
            commit(store, &mut session, refs).map_err(|e| e.to_string())
        });
        match outcome {
            Ok(record) => report.imported.push(record.id()),
            Err(error) => {
                warn!("{} import: row {} rejected: {}", T::COLLECTION, row.row, error);
                report.rejected.push(RejectedRow { row: row.row, error });
            }
        }
        session.cancel();
    }
    info!(
        "{} import: {} imported, {} rejected",
        T::COLLECTION,
        report.imported.len(),
        report.rejected.len()
    );
    Ok(report)
}
