//! Predicate compilation and evaluation
//!
//! Parsed conditions are compiled once per query: the raw filter value is
//! coerced to the field's declared type, `between` ranges are split and
//! URL-decoded, and the substring family is lowercased for
//! case-insensitive matching. The compiled form is evaluated against
//! every scanned document with AND semantics.
//!
//! Null handling mirrors the store's filter expressions: positive
//! operators (`eq`, `cont`, orderings) never match an absent or null
//! field, and their negations (`ne`, `excl`) therefore always do.

use serde_json::Value;
use std::cmp::Ordering;

use crate::core::error::QueryError;
use crate::query::coerce::{self, FieldValue};
use crate::query::filter::{Condition, FilterOp};
use crate::query::schema::{FieldKind, FieldTypeMap};

/// A condition with its operand coerced, ready for evaluation
#[derive(Debug, Clone)]
pub struct CompiledCondition {
    pub field: String,
    pub kind: FieldKind,
    pub test: CompiledTest,
}

/// The operator of a compiled condition together with its typed operand
#[derive(Debug, Clone)]
pub enum CompiledTest {
    Eq(FieldValue),
    Ne(FieldValue),
    /// Lowercased needle for case-insensitive substring matching
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    NotContains(String),
    Gt(FieldValue),
    Gte(FieldValue),
    Lt(FieldValue),
    Lte(FieldValue),
    /// Inclusive range
    Between(FieldValue, FieldValue),
    IsNull,
    NotNull,
}

/// Compile parsed conditions against the entity's field types.
///
/// Coercion failures abort the whole query; by this point malformed and
/// unknown-operator conditions have already been dropped by the parser.
pub fn compile(
    conditions: &[Condition],
    types: &FieldTypeMap,
) -> Result<Vec<CompiledCondition>, QueryError> {
    conditions
        .iter()
        .map(|condition| compile_condition(condition, types))
        .collect()
}

fn compile_condition(
    condition: &Condition,
    types: &FieldTypeMap,
) -> Result<CompiledCondition, QueryError> {
    let kind = types.kind_of(&condition.field);
    let raw = condition.value.as_deref().unwrap_or("");

    let test = match condition.op {
        FilterOp::Eq => CompiledTest::Eq(coerce::coerce(&condition.field, raw, kind)?),
        FilterOp::Ne => CompiledTest::Ne(coerce::coerce(&condition.field, raw, kind)?),
        FilterOp::Cont => CompiledTest::Contains(raw.to_lowercase()),
        FilterOp::Starts => CompiledTest::StartsWith(raw.to_lowercase()),
        FilterOp::Ends => CompiledTest::EndsWith(raw.to_lowercase()),
        FilterOp::Excl => CompiledTest::NotContains(raw.to_lowercase()),
        FilterOp::Gt => CompiledTest::Gt(coerce::coerce(&condition.field, raw, kind)?),
        FilterOp::Gte => CompiledTest::Gte(coerce::coerce(&condition.field, raw, kind)?),
        FilterOp::Lt => CompiledTest::Lt(coerce::coerce(&condition.field, raw, kind)?),
        FilterOp::Lte => CompiledTest::Lte(coerce::coerce(&condition.field, raw, kind)?),
        FilterOp::Between => {
            let (low, high) = split_range(&condition.field, raw)?;
            CompiledTest::Between(
                coerce::coerce(&condition.field, &low, kind)?,
                coerce::coerce(&condition.field, &high, kind)?,
            )
        }
        FilterOp::IsNull => CompiledTest::IsNull,
        FilterOp::NotNull => CompiledTest::NotNull,
    };

    Ok(CompiledCondition {
        field: condition.field.clone(),
        kind,
        test,
    })
}

/// Split a `between` payload into its two endpoints, URL-decoding each
/// endpoint individually
fn split_range(field: &str, raw: &str) -> Result<(String, String), QueryError> {
    let Some((low, high)) = raw.split_once(',') else {
        return Err(QueryError::InvalidRange {
            field: field.to_string(),
            value: raw.to_string(),
        });
    };
    let decode = |part: &str| {
        urlencoding::decode(part)
            .map(|decoded| decoded.into_owned())
            .map_err(|_| QueryError::InvalidRange {
                field: field.to_string(),
                value: raw.to_string(),
            })
    };
    Ok((decode(low)?, decode(high)?))
}

/// Evaluate every condition against a document (AND composition)
pub fn matches_all(doc: &Value, conditions: &[CompiledCondition]) -> bool {
    conditions.iter().all(|condition| matches(doc, condition))
}

/// Evaluate a single compiled condition against a document
pub fn matches(doc: &Value, condition: &CompiledCondition) -> bool {
    let stored = doc.get(&condition.field).unwrap_or(&Value::Null);

    match &condition.test {
        CompiledTest::IsNull => stored.is_null(),
        CompiledTest::NotNull => !stored.is_null(),
        CompiledTest::Eq(want) => typed(condition.kind, stored)
            .is_some_and(|have| have.compare(want) == Some(Ordering::Equal)),
        CompiledTest::Ne(want) => !typed(condition.kind, stored)
            .is_some_and(|have| have.compare(want) == Some(Ordering::Equal)),
        CompiledTest::Contains(needle) => rendered(stored).is_some_and(|s| s.contains(needle)),
        CompiledTest::StartsWith(prefix) => {
            rendered(stored).is_some_and(|s| s.starts_with(prefix))
        }
        CompiledTest::EndsWith(suffix) => rendered(stored).is_some_and(|s| s.ends_with(suffix)),
        CompiledTest::NotContains(needle) => {
            !rendered(stored).is_some_and(|s| s.contains(needle))
        }
        CompiledTest::Gt(want) => ordering_matches(condition.kind, stored, want, |o| {
            o == Ordering::Greater
        }),
        CompiledTest::Gte(want) => ordering_matches(condition.kind, stored, want, |o| {
            o != Ordering::Less
        }),
        CompiledTest::Lt(want) => {
            ordering_matches(condition.kind, stored, want, |o| o == Ordering::Less)
        }
        CompiledTest::Lte(want) => ordering_matches(condition.kind, stored, want, |o| {
            o != Ordering::Greater
        }),
        CompiledTest::Between(low, high) => typed(condition.kind, stored).is_some_and(|have| {
            have.compare(low).is_some_and(|o| o != Ordering::Less)
                && have.compare(high).is_some_and(|o| o != Ordering::Greater)
        }),
    }
}

fn typed(kind: FieldKind, stored: &Value) -> Option<FieldValue> {
    coerce::from_record_value(kind, stored)
}

fn rendered(stored: &Value) -> Option<String> {
    coerce::render_string(stored).map(|s| s.to_lowercase())
}

fn ordering_matches(
    kind: FieldKind,
    stored: &Value,
    want: &FieldValue,
    accept: impl Fn(Ordering) -> bool,
) -> bool {
    typed(kind, stored)
        .and_then(|have| have.compare(want))
        .is_some_and(accept)
}
