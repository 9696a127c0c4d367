//! Typed error handling for the chancery crate
//!
//! Errors are grouped by category so hosting controllers can map them to
//! HTTP responses without string matching:
//!
//! - [`QueryError`]: filter coercion and scan-guard failures
//! - [`EntityError`]: repository-level CRUD failures
//! - [`StorageError`]: failures of the underlying store
//! - [`ConfigError`]: configuration loading and validation
//!
//! A query either produces a full page result or one of these errors;
//! there is no partial-success mode.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::query::schema::FieldKind;

/// The main error type for the chancery crate
#[derive(Debug)]
pub enum ChanceryError {
    /// Query pipeline errors
    Query(QueryError),

    /// Entity repository errors
    Entity(EntityError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ChanceryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChanceryError::Query(e) => write!(f, "{}", e),
            ChanceryError::Entity(e) => write!(f, "{}", e),
            ChanceryError::Storage(e) => write!(f, "{}", e),
            ChanceryError::Config(e) => write!(f, "{}", e),
            ChanceryError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ChanceryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChanceryError::Query(e) => Some(e),
            ChanceryError::Entity(e) => Some(e),
            ChanceryError::Storage(e) => Some(e),
            ChanceryError::Config(e) => Some(e),
            ChanceryError::Internal(_) => None,
        }
    }
}

/// Error response body returned to HTTP clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ChanceryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChanceryError::Query(e) => e.status_code(),
            ChanceryError::Entity(e) => e.status_code(),
            ChanceryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ChanceryError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ChanceryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ChanceryError::Query(e) => e.error_code(),
            ChanceryError::Entity(e) => e.error_code(),
            ChanceryError::Storage(e) => e.error_code(),
            ChanceryError::Config(_) => "CONFIG_ERROR",
            ChanceryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ChanceryError::Query(QueryError::Coercion {
                field,
                value,
                expected,
            }) => Some(serde_json::json!({
                "field": field,
                "value": value,
                "expected": expected.to_string(),
            })),
            ChanceryError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id,
                }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ChanceryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised while turning query parameters into a page result
#[derive(Debug)]
pub enum QueryError {
    /// A filter value could not be coerced to its field's declared type
    Coercion {
        field: String,
        value: String,
        expected: FieldKind,
    },

    /// A `between` payload did not contain two comma-separated endpoints
    InvalidRange {
        field: String,
        value: String,
    },

    /// The filtered working set exceeded the configured scan ceiling
    ScanLimitExceeded {
        matched: usize,
        max: usize,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Coercion {
                field,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Cannot coerce value '{}' for field '{}' to {}",
                    value, field, expected
                )
            }
            QueryError::InvalidRange { field, value } => {
                write!(
                    f,
                    "Range filter on '{}' needs two comma-separated endpoints, got '{}'",
                    field, value
                )
            }
            QueryError::ScanLimitExceeded { matched, max } => {
                write!(
                    f,
                    "Query matched {} records, exceeding the scan ceiling of {}; narrow the filter",
                    matched, max
                )
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::Coercion { .. } => StatusCode::BAD_REQUEST,
            QueryError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            QueryError::ScanLimitExceeded { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::Coercion { .. } => "TYPE_COERCION_FAILED",
            QueryError::InvalidRange { .. } => "INVALID_RANGE",
            QueryError::ScanLimitExceeded { .. } => "SCAN_LIMIT_EXCEEDED",
        }
    }
}

impl From<QueryError> for ChanceryError {
    fn from(err: QueryError) -> Self {
        ChanceryError::Query(err)
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity repository operations
#[derive(Debug)]
pub enum EntityError {
    /// Entity was not found
    NotFound {
        entity_type: String,
        id: i64,
    },

    /// Failed to serialize/deserialize an entity
    Serialization {
        entity_type: String,
        message: String,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            EntityError::Serialization {
                entity_type,
                message,
            } => {
                write!(
                    f,
                    "Failed to serialize/deserialize {}: {}",
                    entity_type, message
                )
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::Serialization { .. } => "ENTITY_SERIALIZATION_ERROR",
        }
    }
}

impl From<EntityError> for ChanceryError {
    fn from(err: EntityError) -> Self {
        ChanceryError::Entity(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the underlying store
///
/// Store failures are not retried; a single failure aborts the query.
#[derive(Debug)]
pub enum StorageError {
    /// A scan could not be executed
    ScanFailed {
        backend: String,
        message: String,
    },

    /// A get/put/update/delete operation failed
    OperationFailed {
        backend: String,
        operation: String,
        message: String,
    },

    /// A document had no usable `id` attribute
    MissingId {
        backend: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ScanFailed { backend, message } => {
                write!(f, "{} scan failed: {}", backend, message)
            }
            StorageError::OperationFailed {
                backend,
                operation,
                message,
            } => {
                write!(f, "{} {} failed: {}", backend, operation, message)
            }
            StorageError::MissingId { backend } => {
                write!(f, "{} document is missing an 'id' attribute", backend)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ScanFailed { .. } => "STORE_SCAN_FAILED",
            StorageError::OperationFailed { .. } => "STORE_OPERATION_FAILED",
            StorageError::MissingId { .. } => "DOCUMENT_MISSING_ID",
        }
    }
}

impl From<StorageError> for ChanceryError {
    fn from(err: StorageError) -> Self {
        ChanceryError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse a configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    FileNotFound {
        path: String,
    },

    /// Invalid value for a configuration field
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError {
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ChanceryError {
    fn from(err: ConfigError) -> Self {
        ChanceryError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for ChanceryError {
    fn from(err: serde_yaml::Error) -> Self {
        ChanceryError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for ChanceryError {
    fn from(err: std::io::Error) -> Self {
        ChanceryError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for chancery operations
pub type ChanceryResult<T> = Result<T, ChanceryError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion_error_display() {
        let err = QueryError::Coercion {
            field: "amount".to_string(),
            value: "abc".to_string(),
            expected: FieldKind::Number,
        };
        let text = err.to_string();
        assert!(text.contains("amount"));
        assert!(text.contains("abc"));
        assert!(text.contains("Number"));
    }

    #[test]
    fn test_query_error_status_codes() {
        assert_eq!(
            QueryError::Coercion {
                field: "a".to_string(),
                value: "b".to_string(),
                expected: FieldKind::Date,
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            QueryError::ScanLimitExceeded {
                matched: 20_000,
                max: 10_000,
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_entity_not_found() {
        let err: ChanceryError = EntityError::NotFound {
            entity_type: "order".to_string(),
            id: 42,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
        assert!(err.to_response().details.is_some());
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::ScanFailed {
            backend: "DynamoDB".to_string(),
            message: "throttled".to_string(),
        };
        assert!(err.to_string().contains("DynamoDB"));
        assert!(err.to_string().contains("throttled"));
    }

    #[test]
    fn test_error_response_serialization() {
        let err: ChanceryError = QueryError::Coercion {
            field: "status".to_string(),
            value: "open".to_string(),
            expected: FieldKind::Number,
        }
        .into();
        let response = err.to_response();
        assert_eq!(response.code, "TYPE_COERCION_FAILED");
        let details = response.details.expect("coercion carries details");
        assert_eq!(details["field"], "status");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::FileNotFound {
            path: "/etc/chancery.yaml".to_string(),
        };
        assert!(err.to_string().contains("/etc/chancery.yaml"));
    }
}
