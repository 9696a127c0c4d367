//! Filter condition parsing
//!
//! Conditions arrive from the query string as `"<field>||<operator>||<value>"`
//! strings (the `isnull`/`notnull` operators take no value part). Malformed
//! strings and unrecognized operators are dropped with a warning rather than
//! failing the query; the request still executes with the remaining
//! conditions.

use std::str::FromStr;

/// Delimiter between the field, operator and value parts of an encoded
/// condition
pub const CONDITION_DELIMITER: &str = "||";

/// The closed set of filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Equals the coerced filter value
    Eq,
    /// Not equal to the coerced filter value
    Ne,
    /// Contains the filter value as a substring (case-insensitive)
    Cont,
    /// Starts with the filter value (case-insensitive)
    Starts,
    /// Ends with the filter value (case-insensitive)
    Ends,
    /// Does not contain the filter value as a substring (case-insensitive)
    Excl,
    /// Greater than the coerced filter value
    Gt,
    /// Greater than or equal to the coerced filter value
    Gte,
    /// Less than the coerced filter value
    Lt,
    /// Less than or equal to the coerced filter value
    Lte,
    /// Within an inclusive range of two comma-separated endpoints
    Between,
    /// Field is absent or null
    IsNull,
    /// Field is present and not null
    NotNull,
}

impl FilterOp {
    /// Whether this operator carries a value part
    pub fn takes_value(&self) -> bool {
        !matches!(self, FilterOp::IsNull | FilterOp::NotNull)
    }
}

/// Error returned when an operator string is not in the closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator(pub String);

impl std::fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown filter operator '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperator {}

impl FromStr for FilterOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(FilterOp::Eq),
            "ne" => Ok(FilterOp::Ne),
            "cont" => Ok(FilterOp::Cont),
            "starts" => Ok(FilterOp::Starts),
            "ends" => Ok(FilterOp::Ends),
            "excl" => Ok(FilterOp::Excl),
            "gt" => Ok(FilterOp::Gt),
            "gte" => Ok(FilterOp::Gte),
            "lt" => Ok(FilterOp::Lt),
            "lte" => Ok(FilterOp::Lte),
            "between" => Ok(FilterOp::Between),
            "isnull" => Ok(FilterOp::IsNull),
            "notnull" => Ok(FilterOp::NotNull),
            other => Err(UnknownOperator(other.to_string())),
        }
    }
}

/// A parsed filter condition: field, operator and the still-raw value
///
/// `value` is `Some` exactly when the operator takes a value part; coercion
/// to the field's declared type happens later, in the predicate compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: String,
    pub op: FilterOp,
    pub value: Option<String>,
}

/// Decode a batch of encoded condition strings.
///
/// Conditions that do not split into the expected parts, or whose operator
/// is not recognized, are skipped. The dropped condition is logged so the
/// leniency is at least visible in traces.
pub fn parse_conditions(encoded: &[String]) -> Vec<Condition> {
    encoded
        .iter()
        .filter_map(|raw| match parse_condition(raw) {
            Some(condition) => Some(condition),
            None => {
                tracing::warn!(condition = %raw, "dropping malformed filter condition");
                None
            }
        })
        .collect()
}

fn parse_condition(raw: &str) -> Option<Condition> {
    let parts: Vec<&str> = raw.split(CONDITION_DELIMITER).collect();
    let (field, op_str, value) = match parts.as_slice() {
        [field, op] => (*field, *op, None),
        [field, op, value] => (*field, *op, Some(*value)),
        _ => return None,
    };

    if field.is_empty() {
        return None;
    }

    let op = FilterOp::from_str(op_str).ok()?;
    if op.takes_value() && value.is_none() {
        return None;
    }

    Some(Condition {
        field: field.to_string(),
        op,
        // A value part on isnull/notnull is tolerated and ignored
        value: if op.takes_value() {
            value.map(str::to_string)
        } else {
            None
        },
    })
}
