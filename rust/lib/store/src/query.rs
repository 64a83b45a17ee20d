//! Query view: a filtered, read-only projection of an entity store.
//!
//! Free-text matching is a case-insensitive substring test over the
//! entity's `SEARCH_FIELDS`. Structured filters are exact (status, `Eq`) or
//! inclusive ranges (dates). Results keep store insertion order; there is
//! no paging and no sorting.

use chrono::NaiveDate;
use fabdesk_core::{ServiceError, parse_stamp};
use serde_json::Value;

use crate::entity::Entity;
use crate::field::value_text;

/// A structured filter on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `status` equals the value (case-insensitive).
    Status(String),
    /// The field's text rendering equals the value's.
    Eq { field: String, value: Value },
    /// The field parses as a date within `from..=to`. Open ends are unbounded.
    DateRange {
        field: String,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl Filter {
    pub fn status(s: impl Into<String>) -> Self {
        Filter::Status(s.into())
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn date_range(
        field: impl Into<String>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        Filter::DateRange {
            field: field.into(),
            from,
            to,
        }
    }

    /// Parse `key=value` filter syntax:
    ///
    /// - `status=active`
    /// - `customerId=2`
    /// - `date=2024-01-01..2024-03-31` (either side may be empty)
    pub fn parse(spec: &str) -> Result<Self, ServiceError> {
        let (key, value) = spec
            .split_once('=')
            .ok_or_else(|| ServiceError::Validation(format!("filter '{}': expected key=value", spec)))?;
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(ServiceError::Validation(format!("filter '{}': empty field name", spec)));
        }
        if key == "status" {
            return Ok(Filter::status(value));
        }
        if let Some((from, to)) = value.split_once("..") {
            let bound = |s: &str| -> Result<Option<NaiveDate>, ServiceError> {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Some).map_err(|_| {
                    ServiceError::Validation(format!("filter '{}': '{}' is not a YYYY-MM-DD date", spec, s))
                })
            };
            return Ok(Filter::date_range(key, bound(from)?, bound(to)?));
        }
        Ok(Filter::eq(key, value))
    }

    fn matches(&self, doc: &Value, status: Option<&str>) -> bool {
        match self {
            Filter::Status(want) => status.is_some_and(|s| s.eq_ignore_ascii_case(want)),
            Filter::Eq { field, value } => {
                field_value(doc, field).is_some_and(|v| value_text(v) == value_text(value))
            }
            Filter::DateRange { field, from, to } => {
                let Some(date) = field_value(doc, field)
                    .and_then(Value::as_str)
                    .and_then(parse_stamp)
                    .map(|t| t.date_naive())
                else {
                    return false;
                };
                from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t)
            }
        }
    }
}

/// Free-text term plus structured filters. The default query matches all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub term: String,
    pub filters: Vec<Filter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_match_all(&self) -> bool {
        self.term.trim().is_empty() && self.filters.is_empty()
    }

    pub fn matches<T: Entity>(&self, record: &T) -> bool {
        self.matches_with(record, &[])
    }

    /// Like [`matches`](Self::matches), but the term may also hit any of
    /// `related` (text from records this one references).
    pub fn matches_with<T: Entity>(&self, record: &T, related: &[String]) -> bool {
        if self.is_match_all() {
            return true;
        }
        let doc = serde_json::to_value(record).unwrap_or_default();
        let needle = self.term.trim().to_lowercase();
        let term_hit = needle.is_empty()
            || search_doc::<T>(&doc)
                .iter()
                .chain(related)
                .any(|text| text.to_lowercase().contains(&needle));
        term_hit && self.filters.iter().all(|f| f.matches(&doc, record.status()))
    }

    /// The matching records in store order.
    pub fn apply<'a, T: Entity>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

/// Searchable text of a serialized record, one entry per present field.
pub fn search_doc<T: Entity>(doc: &Value) -> Vec<String> {
    T::SEARCH_FIELDS
        .iter()
        .filter_map(|name| field_value(doc, name))
        .filter(|v| !v.is_null())
        .map(value_text)
        .collect()
}

/// Look a field up by its JSON name, accepting snake_case input too.
fn field_value<'a>(doc: &'a Value, name: &str) -> Option<&'a Value> {
    doc.get(name).or_else(|| doc.get(to_camel_case(name)))
}

fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;
    for ch in s.chars() {
        if ch == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(ch.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}
