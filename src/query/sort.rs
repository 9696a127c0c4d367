//! In-memory ordering of scanned result sets
//!
//! The store cannot sort arbitrary fields during a scan, so ordering is
//! applied after filtering, over the full result set. The comparison is
//! inferred from each runtime value's own type, not from the schema, so
//! a numeric field persisted as a string still sorts the way it is
//! stored.

use serde_json::Value;
use std::cmp::Ordering;

use crate::query::params::{SortDirection, SortSpec};

/// Sort records in place according to the sort spec.
///
/// The sort is stable: records that compare equal keep their scan order,
/// which makes repeated pagination over identical inputs deterministic.
/// Records with a null or missing sort field sink to the end in both
/// directions.
pub fn sort_records(records: &mut [Value], spec: &SortSpec) {
    records.sort_by(|a, b| compare_records(a, b, spec));
}

fn compare_records(a: &Value, b: &Value, spec: &SortSpec) -> Ordering {
    let left = a.get(&spec.field).unwrap_or(&Value::Null);
    let right = b.get(&spec.field).unwrap_or(&Value::Null);

    // Nulls last, regardless of direction: the null check happens before
    // the direction is applied, so it is deliberately not symmetric
    match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = compare_values(left, right);
            match spec.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// Compare two non-null values by their own runtime type: numbers
/// naturally, strings by code point, booleans false-before-true, and any
/// mixed or non-scalar pair by its JSON rendering
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}
