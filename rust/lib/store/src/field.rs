//! Form field declarations and the coercion applied at commit time.
//!
//! Validation is deliberately shallow: presence of required fields plus
//! primitive type coercion (numeric parse, date parse, enum membership,
//! simple length/minimum bounds). Nothing here looks across fields.

use chrono::NaiveDate;
use fabdesk_core::parse_stamp;
use serde_json::{Number, Value};

/// What a field holds and how raw form input is coerced into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free text. `min_len` counts characters after trimming.
    Text { min_len: usize },
    /// Decimal number. Strings are parsed; `min` is inclusive.
    Number { min: Option<f64> },
    /// Whole number. Strings are parsed; bounds are inclusive.
    Integer { min: Option<i64>, max: Option<i64> },
    /// Calendar date, stored as `YYYY-MM-DD`.
    Date,
    /// One of a closed set of values (matched case-insensitively).
    Enum(&'static [&'static str]),
    /// Structured JSON (arrays of line items and the like). Strings are
    /// parsed as JSON so spreadsheet cells round-trip.
    Json,
}

/// A form field of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    /// JSON (camelCase) name of the field.
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind, required: bool) -> Self {
        Self { name, kind, required }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text { min_len: 1 }, true)
    }

    pub const fn optional_text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text { min_len: 0 }, false)
    }

    pub const fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number { min: None }, true)
    }

    pub const fn id_ref(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer { min: Some(1), max: None }, true)
    }

    /// Optional whole-number percentage, 0 to 100.
    pub const fn percent(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer { min: Some(0), max: Some(100) }, false)
    }

    pub const fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date, true)
    }

    pub const fn status(values: &'static [&'static str]) -> Self {
        Self::new("status", FieldKind::Enum(values), true)
    }

    /// Coerce a raw (non-blank) input value into the stored representation.
    ///
    /// The error is a short reason without the field name; callers prefix it.
    pub fn coerce(&self, raw: &Value) -> Result<Value, String> {
        match self.kind {
            FieldKind::Text { min_len } => {
                let s = match raw {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return Err("expected text".into()),
                };
                if s.trim().chars().count() < min_len {
                    return Err(format!("must be at least {} characters", min_len));
                }
                Ok(Value::String(s))
            }
            FieldKind::Number { min } => {
                let n = match raw {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                }
                .filter(|n| n.is_finite())
                .ok_or_else(|| format!("'{}' is not a number", value_text(raw)))?;
                if let Some(min) = min {
                    if n < min {
                        return Err(format!("must be at least {}", min));
                    }
                }
                Ok(number_value(n))
            }
            FieldKind::Integer { min, max } => {
                let n = match raw {
                    Value::Number(n) => n
                        .as_i64()
                        .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                }
                .ok_or_else(|| format!("'{}' is not a whole number", value_text(raw)))?;
                if let Some(min) = min {
                    if n < min {
                        return Err(format!("must be at least {}", min));
                    }
                }
                if let Some(max) = max {
                    if n > max {
                        return Err(format!("must be at most {}", max));
                    }
                }
                Ok(Value::Number(n.into()))
            }
            FieldKind::Date => {
                let s = raw.as_str().ok_or("expected a date")?.trim();
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .or_else(|| parse_stamp(s).map(|t| t.date_naive()))
                    .ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", s))?;
                Ok(Value::String(date.format("%Y-%m-%d").to_string()))
            }
            FieldKind::Enum(allowed) => {
                let s = raw.as_str().ok_or("expected text")?.trim();
                allowed
                    .iter()
                    .find(|a| a.eq_ignore_ascii_case(s))
                    .map(|a| Value::String(a.to_string()))
                    .ok_or_else(|| format!("'{}' is not one of {}", s, allowed.join("/")))
            }
            FieldKind::Json => match raw {
                Value::String(s) => {
                    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {}", e))
                }
                other => Ok(other.clone()),
            },
        }
    }
}

/// Whether a raw form value counts as "not filled in".
pub fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Integral values stay integers in JSON (`"1500000"` → `1500000`).
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::Number((n as i64).into())
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Render a JSON value the way a form or spreadsheet cell shows it.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
