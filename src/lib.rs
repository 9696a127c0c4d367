//! # Chancery
//!
//! Backend core of the Chancery legal-office web presence: entity
//! repositories for orders, users and comments over a wide-column store,
//! unified by a schema-aware query pipeline.
//!
//! ## Features
//!
//! - **One pipeline for every entity**: filter, sort and paginate
//!   through a single `process_query` entry point
//! - **Typed filter coercion**: per-entity field type declarations turn
//!   string query parameters into typed comparisons
//! - **Closed operator set**: `eq`, `ne`, `cont`, `starts`, `ends`,
//!   `excl`, `gt`, `gte`, `lt`, `lte`, `between`, `isnull`, `notnull`
//! - **Deterministic ordering**: stable sort with nulls last in both
//!   directions, so repeated pagination never shuffles ties
//! - **Explicit scan ceiling**: the store is scanned in full on every
//!   query; the configured `max_scan_size` turns silent degradation
//!   into a typed error
//! - **Pluggable stores**: in-memory for development and tests,
//!   DynamoDB behind the `dynamodb` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chancery::prelude::*;
//!
//! let config = AppConfig::from_env()?;
//! let store = InMemoryStore::new();
//! let orders: EntityRepository<Order, _> = EntityRepository::new(store, &config);
//!
//! let params = ListParams {
//!     filter: vec!["status||eq||1".to_string()],
//!     sort: "created_at,DESC".to_string(),
//!     ..Default::default()
//! };
//! let page = orders.list(&params).await?;
//! println!("{} of {} orders", page.count, page.total);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod query;
pub mod storage;

/// Install the process-wide tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to `info`. Call once at process start,
/// before the first repository is constructed.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ChanceryError, ChanceryResult, ConfigError, Entity, EntityError, ErrorResponse,
        QueryError, StorageError,
    };

    // === Query pipeline ===
    pub use crate::query::{
        FieldKind, FieldTypeMap, FilterOp, ListParams, PageRequest, PageResult, SortDirection,
        SortSpec, process_query,
    };

    // === Macros ===
    pub use crate::field_types;

    // === Entities ===
    pub use crate::entities::{Comment, EntityRepository, Order, User};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, Store};
    #[cfg(feature = "dynamodb")]
    pub use crate::storage::DynamoStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
