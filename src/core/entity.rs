//! Entity trait defining what repositories need from a domain type

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::query::schema::FieldTypeMap;

/// Base trait for all persisted entities.
///
/// An entity declares its resource names (used for table naming and
/// error messages) and its field types (used by the query pipeline to
/// coerce filter values). The declarations are static: the schema is
/// fixed at compile time rather than probed from the store at runtime.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The plural resource name used for table naming (e.g. "orders")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g. "order")
    fn resource_name_singular() -> &'static str;

    /// Declared field types for filter value coercion
    fn field_types() -> FieldTypeMap;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> i64;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;
}
