//! Generic entity repository
//!
//! One repository type serves every entity: the entity contributes its
//! field types and resource names, the store contributes persistence,
//! and the query pipeline does the rest. List semantics are therefore
//! identical across orders, users and comments.

use serde_json::Value;
use std::marker::PhantomData;

use crate::config::AppConfig;
use crate::core::entity::Entity;
use crate::core::error::{ChanceryResult, EntityError};
use crate::query::{self, ListParams, PageResult};
use crate::storage::Store;

/// Repository over one entity collection
pub struct EntityRepository<T: Entity, S: Store> {
    store: S,
    types: query::FieldTypeMap,
    max_scan_size: usize,
    _entity: PhantomData<T>,
}

impl<T: Entity, S: Store> EntityRepository<T, S> {
    /// Create a repository over `store`, wired to the process
    /// configuration
    pub fn new(store: S, config: &AppConfig) -> Self {
        Self {
            store,
            types: T::field_types(),
            max_scan_size: config.max_scan_size,
            _entity: PhantomData,
        }
    }

    /// List entities: filter, sort and paginate in one pass.
    ///
    /// Every query scans the whole collection; see the crate docs for
    /// the scalability ceiling this implies.
    pub async fn list(&self, params: &ListParams) -> ChanceryResult<PageResult<T>> {
        let result = query::process_query(
            &self.store,
            &params.filter,
            &self.types,
            &params.sort_spec(),
            &params.page_request(),
            self.max_scan_size,
        )
        .await?;

        result.try_map(|doc| self.decode(doc))
    }

    /// Fetch an entity by id
    pub async fn get(&self, id: i64) -> ChanceryResult<Option<T>> {
        match self.store.get(&id.to_string()).await? {
            Some(doc) => Ok(Some(self.decode(doc)?)),
            None => Ok(None),
        }
    }

    /// Fetch an entity by id, failing with `ENTITY_NOT_FOUND` when absent
    pub async fn find(&self, id: i64) -> ChanceryResult<T> {
        self.get(id).await?.ok_or_else(|| {
            EntityError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id,
            }
            .into()
        })
    }

    /// Persist a new entity
    pub async fn create(&self, entity: T) -> ChanceryResult<T> {
        let doc = self.encode(&entity)?;
        self.store.put(doc).await?;
        tracing::debug!(
            entity = T::resource_name_singular(),
            id = entity.id(),
            "entity created"
        );
        Ok(entity)
    }

    /// Replace an existing entity
    pub async fn update(&self, id: i64, entity: T) -> ChanceryResult<T> {
        if self.store.get(&id.to_string()).await?.is_none() {
            return Err(EntityError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id,
            }
            .into());
        }

        let doc = self.encode(&entity)?;
        self.store.update(&id.to_string(), doc).await?;
        Ok(entity)
    }

    /// Delete an entity by id (idempotent, mirroring the store contract)
    pub async fn delete(&self, id: i64) -> ChanceryResult<()> {
        self.store.delete(&id.to_string()).await?;
        tracing::debug!(
            entity = T::resource_name_singular(),
            id,
            "entity deleted"
        );
        Ok(())
    }

    fn encode(&self, entity: &T) -> ChanceryResult<Value> {
        serde_json::to_value(entity).map_err(|e| {
            EntityError::Serialization {
                entity_type: T::resource_name_singular().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn decode(&self, doc: Value) -> ChanceryResult<T> {
        serde_json::from_value(doc).map_err(|e| {
            EntityError::Serialization {
                entity_type: T::resource_name_singular().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}
