//! Per-entity field type declarations used for filter value coercion

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Semantic type of an entity field.
///
/// Declared once per entity at repository construction and consulted when
/// coercing raw filter values. Fields not declared in a [`FieldTypeMap`]
/// are treated as [`FieldKind::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    String,
    Number,
    Date,
    Boolean,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "String"),
            FieldKind::Number => write!(f, "Number"),
            FieldKind::Date => write!(f, "Date"),
            FieldKind::Boolean => write!(f, "Boolean"),
        }
    }
}

/// Immutable mapping from field name to its declared [`FieldKind`].
///
/// Built once per entity type (see the [`field_types!`](crate::field_types)
/// macro) and never mutated at runtime. Unknown fields fall back to
/// `String` rather than being rejected, so callers can filter on fields
/// the schema does not declare.
#[derive(Debug, Clone, Default)]
pub struct FieldTypeMap {
    kinds: HashMap<String, FieldKind>,
}

impl FieldTypeMap {
    /// Create an empty type map (every field resolves to `String`)
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Declare the kind of a field
    pub fn declare(&mut self, field: &str, kind: FieldKind) {
        self.kinds.insert(field.to_string(), kind);
    }

    /// Resolve the kind of a field, defaulting to `String` for
    /// undeclared fields
    pub fn kind_of(&self, field: &str) -> FieldKind {
        self.kinds.get(field).copied().unwrap_or(FieldKind::String)
    }

    /// Whether the field was explicitly declared
    pub fn contains(&self, field: &str) -> bool {
        self.kinds.contains_key(field)
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no fields are declared
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Macro for declaring an entity's field types tersely
///
/// # Example
/// ```rust,ignore
/// let types = field_types! {
///     "id" => Number,
///     "client_name" => String,
///     "created_at" => Date,
/// };
/// assert_eq!(types.kind_of("id"), FieldKind::Number);
/// ```
#[macro_export]
macro_rules! field_types {
    ( $( $field:literal => $kind:ident ),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut map = $crate::query::schema::FieldTypeMap::new();
        $( map.declare($field, $crate::query::schema::FieldKind::$kind); )*
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undeclared_field_defaults_to_string() {
        let types = FieldTypeMap::new();
        assert_eq!(types.kind_of("anything"), FieldKind::String);
        assert!(!types.contains("anything"));
    }

    #[test]
    fn test_declare_and_resolve() {
        let mut types = FieldTypeMap::new();
        types.declare("id", FieldKind::Number);
        types.declare("created_at", FieldKind::Date);

        assert_eq!(types.kind_of("id"), FieldKind::Number);
        assert_eq!(types.kind_of("created_at"), FieldKind::Date);
        assert_eq!(types.len(), 2);
    }

    #[test]
    fn test_field_types_macro() {
        let types = field_types! {
            "id" => Number,
            "active" => Boolean,
            "name" => String,
        };
        assert_eq!(types.kind_of("id"), FieldKind::Number);
        assert_eq!(types.kind_of("active"), FieldKind::Boolean);
        assert_eq!(types.kind_of("name"), FieldKind::String);
        assert_eq!(types.kind_of("missing"), FieldKind::String);
    }

    #[test]
    fn test_empty_macro_invocation() {
        let types = field_types! {};
        assert!(types.is_empty());
    }

    #[test]
    fn test_field_kind_display() {
        assert_eq!(FieldKind::Number.to_string(), "Number");
        assert_eq!(FieldKind::Date.to_string(), "Date");
    }
}
