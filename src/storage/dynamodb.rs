//! DynamoDB store implementation
//!
//! Scans the entity's table and filters server-side where DynamoDB's
//! expression language can express a condition faithfully: equality on
//! scalar attributes and numeric range comparisons. Everything else
//! (case-insensitive substring matching, null checks on typed
//! attributes, date comparisons across string formats) is evaluated
//! in-process after the scan. The in-process predicate is re-applied to
//! every returned item either way, so the server-side expression is a
//! bandwidth reduction, never the authority.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};
use serde_json::Value;
use std::collections::HashMap;

use crate::core::error::StorageError;
use crate::query::coerce::FieldValue;
use crate::query::predicate::{self, CompiledCondition, CompiledTest};
use crate::storage::{Store, document_id};

const BACKEND: &str = "DynamoDB";

/// DynamoDB-backed store for one entity table
#[derive(Clone)]
pub struct DynamoStore {
    client: DynamoDbClient,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    fn scan_failed(&self, message: impl ToString) -> StorageError {
        StorageError::ScanFailed {
            backend: BACKEND.to_string(),
            message: message.to_string(),
        }
    }

    fn operation_failed(&self, operation: &str, message: impl ToString) -> StorageError {
        StorageError::OperationFailed {
            backend: BACKEND.to_string(),
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }
}

/// Server-side filter expression assembled from the pushdown-safe subset
/// of the compiled conditions
#[derive(Debug, Default)]
struct PushdownFilter {
    expression: Option<String>,
    names: Option<HashMap<String, String>>,
    values: Option<HashMap<String, AttributeValue>>,
}

fn build_pushdown(conditions: &[CompiledCondition]) -> PushdownFilter {
    let mut clauses = Vec::new();
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    for (i, condition) in conditions.iter().enumerate() {
        let name = format!("#f{}", i);
        let value = format!(":v{}", i);

        let clause = match &condition.test {
            CompiledTest::Eq(want) => attribute_value(want).map(|av| {
                values.insert(value.clone(), av);
                format!("{} = {}", name, value)
            }),
            CompiledTest::Gt(want) => numeric_attribute(want).map(|av| {
                values.insert(value.clone(), av);
                format!("{} > {}", name, value)
            }),
            CompiledTest::Gte(want) => numeric_attribute(want).map(|av| {
                values.insert(value.clone(), av);
                format!("{} >= {}", name, value)
            }),
            CompiledTest::Lt(want) => numeric_attribute(want).map(|av| {
                values.insert(value.clone(), av);
                format!("{} < {}", name, value)
            }),
            CompiledTest::Lte(want) => numeric_attribute(want).map(|av| {
                values.insert(value.clone(), av);
                format!("{} <= {}", name, value)
            }),
            CompiledTest::Between(low, high) => {
                match (numeric_attribute(low), numeric_attribute(high)) {
                    (Some(lo), Some(hi)) => {
                        let high_value = format!(":w{}", i);
                        values.insert(value.clone(), lo);
                        values.insert(high_value.clone(), hi);
                        Some(format!("{} BETWEEN {} AND {}", name, value, high_value))
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        if let Some(clause) = clause {
            names.insert(name, condition.field.clone());
            clauses.push(clause);
        }
    }

    if clauses.is_empty() {
        return PushdownFilter::default();
    }
    PushdownFilter {
        expression: Some(clauses.join(" AND ")),
        names: Some(names),
        values: Some(values),
    }
}

/// Scalar attribute value for equality pushdown; dates are excluded
/// because stored timestamp renderings vary in sub-second precision
fn attribute_value(value: &FieldValue) -> Option<AttributeValue> {
    match value {
        FieldValue::String(s) => Some(AttributeValue::S(s.clone())),
        FieldValue::Number(n) => Some(AttributeValue::N(render_number(*n))),
        FieldValue::Boolean(b) => Some(AttributeValue::Bool(*b)),
        FieldValue::Date(_) => None,
    }
}

fn numeric_attribute(value: &FieldValue) -> Option<AttributeValue> {
    match value {
        FieldValue::Number(n) => Some(AttributeValue::N(render_number(*n))),
        _ => None,
    }
}

/// Render an f64 the way stored integers are rendered, so `150` matches
/// an item persisted as `150` rather than `150.0`
fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// Key attribute for item-level operations; numeric ids map to `N` keys
fn key_attribute(id: &str) -> AttributeValue {
    if id.parse::<f64>().is_ok() {
        AttributeValue::N(id.to_string())
    } else {
        AttributeValue::S(id.to_string())
    }
}

#[async_trait]
impl Store for DynamoStore {
    async fn scan(&self, conditions: &[CompiledCondition]) -> Result<Vec<Value>, StorageError> {
        let pushdown = build_pushdown(conditions);
        let mut documents: Vec<Value> = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;
        let mut pages = 0_usize;

        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_filter_expression(pushdown.expression.clone())
                .set_expression_attribute_names(pushdown.names.clone())
                .set_expression_attribute_values(pushdown.values.clone())
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| self.scan_failed(e))?;

            pages += 1;
            if let Some(items) = result.items {
                for item in items {
                    let doc: Value = from_item(item).map_err(|e| self.scan_failed(e))?;
                    documents.push(doc);
                }
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        // The expression above only narrows the scan; the predicate is
        // the authority on what matches
        documents.retain(|doc| predicate::matches_all(doc, conditions));
        tracing::debug!(
            table = %self.table_name,
            pages,
            matched = documents.len(),
            "scan complete"
        );
        Ok(documents)
    }

    async fn get(&self, id: &str) -> Result<Option<Value>, StorageError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", key_attribute(id))
            .send()
            .await
            .map_err(|e| self.operation_failed("get", e))?;

        match result.item {
            Some(item) => {
                let doc: Value = from_item(item).map_err(|e| self.operation_failed("get", e))?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, doc: Value) -> Result<Value, StorageError> {
        if document_id(&doc).is_none() {
            return Err(StorageError::MissingId {
                backend: BACKEND.to_string(),
            });
        }

        let item = to_item(doc.clone()).map_err(|e| self.operation_failed("put", e))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| self.operation_failed("put", e))?;

        Ok(doc)
    }

    async fn update(&self, id: &str, doc: Value) -> Result<Value, StorageError> {
        let item = to_item(doc.clone()).map_err(|e| self.operation_failed("update", e))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| self.operation_failed("update", e))?;

        tracing::debug!(table = %self.table_name, id = %id, "document replaced");
        Ok(doc)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", key_attribute(id))
            .send()
            .await
            .map_err(|e| self.operation_failed("delete", e))?;

        Ok(())
    }
}
