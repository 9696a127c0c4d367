//! Store trait and backend implementations
//!
//! The store is a black box to the query pipeline: a keyed collection of
//! JSON documents supporting a filtered full scan plus item-level CRUD.
//! Each backend translates compiled conditions into whatever filtering
//! it can do natively, but the contract is the same everywhere: `scan`
//! returns exactly the set of documents matching every condition.

use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::StorageError;
use crate::query::predicate::CompiledCondition;

pub mod in_memory;
pub use in_memory::InMemoryStore;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoStore;

/// A handle to one entity's collection in the underlying store
#[async_trait]
pub trait Store: Send + Sync {
    /// Scan the whole collection and return the documents matching every
    /// condition (AND semantics). The only read the query pipeline ever
    /// issues.
    async fn scan(&self, conditions: &[CompiledCondition]) -> Result<Vec<Value>, StorageError>;

    /// Fetch a single document by id
    async fn get(&self, id: &str) -> Result<Option<Value>, StorageError>;

    /// Insert or replace a document; the key is taken from its `id`
    /// attribute
    async fn put(&self, doc: Value) -> Result<Value, StorageError>;

    /// Replace the document stored under `id`
    async fn update(&self, id: &str, doc: Value) -> Result<Value, StorageError>;

    /// Delete the document stored under `id` (idempotent)
    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// Extract the storage key from a document's `id` attribute.
///
/// Numeric and string ids are both accepted; the key is the canonical
/// string rendering either way.
pub(crate) fn document_id(doc: &Value) -> Option<String> {
    match doc.get("id") {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
