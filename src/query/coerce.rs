//! Coercion of raw filter values into typed field values
//!
//! Filter values arrive as strings regardless of the field they target.
//! Before a condition can be evaluated, both the filter value and the
//! stored record value are lifted into a [`FieldValue`] according to the
//! field's declared [`FieldKind`]. A filter value that cannot be parsed
//! as its declared type fails the whole query with a typed error; a
//! record value that cannot be parsed simply never matches.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;

use crate::core::error::QueryError;
use crate::query::schema::FieldKind;

/// A filter or record value after coercion to its field's declared type
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(f64),
    Date(DateTime<Utc>),
    Boolean(bool),
}

impl FieldValue {
    /// Compare two values of the same kind.
    ///
    /// Returns `None` for values of different kinds; the predicate treats
    /// an incomparable pair as a non-match.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => Some(a.cmp(b)),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.partial_cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Coerce a raw filter value into the field's declared type.
///
/// Pure function: `String` (and any undeclared field) passes through
/// unchanged, `Boolean` never fails, `Number` and `Date` surface a
/// [`QueryError::Coercion`] on unparseable input instead of silently
/// defaulting.
pub fn coerce(field: &str, raw: &str, kind: FieldKind) -> Result<FieldValue, QueryError> {
    match kind {
        FieldKind::String => Ok(FieldValue::String(raw.to_string())),
        FieldKind::Number => raw
            .trim()
            .parse::<f64>()
            .map(FieldValue::Number)
            .map_err(|_| QueryError::Coercion {
                field: field.to_string(),
                value: raw.to_string(),
                expected: kind,
            }),
        FieldKind::Date => parse_date(raw)
            .map(FieldValue::Date)
            .ok_or_else(|| QueryError::Coercion {
                field: field.to_string(),
                value: raw.to_string(),
                expected: kind,
            }),
        FieldKind::Boolean => Ok(FieldValue::Boolean(raw.eq_ignore_ascii_case("true"))),
    }
}

/// Lift a stored record value into the field's declared type.
///
/// Stored values may diverge from the schema (a numeric field persisted
/// as a string, for instance); where a sensible reading exists it is
/// taken, otherwise `None` is returned and the condition does not match.
pub fn from_record_value(kind: FieldKind, value: &Value) -> Option<FieldValue> {
    if value.is_null() {
        return None;
    }
    match kind {
        FieldKind::String => render_string(value).map(FieldValue::String),
        FieldKind::Number => match value {
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::String(s) => s.trim().parse::<f64>().ok().map(FieldValue::Number),
            _ => None,
        },
        FieldKind::Date => match value {
            Value::String(s) => parse_date(s).map(FieldValue::Date),
            _ => None,
        },
        FieldKind::Boolean => match value {
            Value::Bool(b) => Some(FieldValue::Boolean(*b)),
            Value::String(s) => Some(FieldValue::Boolean(s.eq_ignore_ascii_case("true"))),
            _ => None,
        },
    }
}

/// Render a scalar JSON value as a string for substring matching
pub fn render_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse an RFC 3339 timestamp, a bare `YYYY-MM-DDTHH:MM:SS` timestamp,
/// or a plain `YYYY-MM-DD` calendar date (midnight UTC)
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
