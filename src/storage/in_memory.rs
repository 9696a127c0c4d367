//! In-memory store implementation for testing and development

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::core::error::StorageError;
use crate::query::predicate::{self, CompiledCondition};
use crate::storage::{Store, document_id};

const BACKEND: &str = "in-memory";

/// In-memory store for one entity collection
///
/// Useful for testing and development. Uses RwLock for thread-safe
/// access; the predicate is evaluated directly during the scan, which
/// makes this backend the reference implementation of the store
/// contract.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    documents: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store pre-populated with documents (test fixture helper)
    pub fn with_documents(docs: Vec<Value>) -> Result<Self, StorageError> {
        let mut map = HashMap::new();
        for doc in docs {
            let id = document_id(&doc).ok_or(StorageError::MissingId {
                backend: BACKEND.to_string(),
            })?;
            map.insert(id, doc);
        }
        Ok(Self {
            documents: Arc::new(RwLock::new(map)),
        })
    }

    fn operation_failed(operation: &str, message: impl ToString) -> StorageError {
        StorageError::OperationFailed {
            backend: BACKEND.to_string(),
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn scan(&self, conditions: &[CompiledCondition]) -> Result<Vec<Value>, StorageError> {
        let documents = self.documents.read().map_err(|e| StorageError::ScanFailed {
            backend: BACKEND.to_string(),
            message: e.to_string(),
        })?;

        Ok(documents
            .values()
            .filter(|doc| predicate::matches_all(doc, conditions))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Value>, StorageError> {
        let documents = self
            .documents
            .read()
            .map_err(|e| Self::operation_failed("get", e))?;

        Ok(documents.get(id).cloned())
    }

    async fn put(&self, doc: Value) -> Result<Value, StorageError> {
        let id = document_id(&doc).ok_or(StorageError::MissingId {
            backend: BACKEND.to_string(),
        })?;

        let mut documents = self
            .documents
            .write()
            .map_err(|e| Self::operation_failed("put", e))?;

        documents.insert(id, doc.clone());
        Ok(doc)
    }

    async fn update(&self, id: &str, doc: Value) -> Result<Value, StorageError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| Self::operation_failed("update", e))?;

        documents.insert(id.to_string(), doc.clone());
        Ok(doc)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| Self::operation_failed("delete", e))?;

        documents.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_types;
    use crate::query::filter::parse_conditions;
    use serde_json::json;

    fn compiled(encoded: &[&str]) -> Vec<CompiledCondition> {
        let types = field_types! {
            "id" => Number,
            "status" => Number,
        };
        let raw: Vec<String> = encoded.iter().map(|s| s.to_string()).collect();
        predicate::compile(&parse_conditions(&raw), &types).expect("conditions should compile")
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemoryStore::new();
        store
            .put(json!({"id": 1, "status": 1}))
            .await
            .expect("put should succeed");

        let doc = store.get("1").await.expect("get should succeed");
        assert_eq!(doc, Some(json!({"id": 1, "status": 1})));
    }

    #[tokio::test]
    async fn test_put_without_id_fails() {
        let store = InMemoryStore::new();
        let err = store.put(json!({"status": 1})).await.unwrap_err();
        assert!(matches!(err, StorageError::MissingId { .. }));
    }

    #[tokio::test]
    async fn test_scan_applies_conditions() {
        let store = InMemoryStore::with_documents(vec![
            json!({"id": 1, "status": 1}),
            json!({"id": 2, "status": 0}),
            json!({"id": 3, "status": 1}),
        ])
        .expect("fixture should build");

        let matched = store
            .scan(&compiled(&["status||eq||1"]))
            .await
            .expect("scan should succeed");
        assert_eq!(matched.len(), 2);

        let all = store.scan(&[]).await.expect("scan should succeed");
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let store = InMemoryStore::with_documents(vec![json!({"id": 1, "status": 0})])
            .expect("fixture should build");

        store
            .update("1", json!({"id": 1, "status": 2}))
            .await
            .expect("update should succeed");

        let doc = store.get("1").await.expect("get should succeed");
        assert_eq!(doc, Some(json!({"id": 1, "status": 2})));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryStore::with_documents(vec![json!({"id": 1})])
            .expect("fixture should build");

        store.delete("1").await.expect("delete should succeed");
        assert_eq!(store.get("1").await.expect("get should succeed"), None);

        // Deleting again is not an error
        store.delete("1").await.expect("delete should succeed");
    }
}
