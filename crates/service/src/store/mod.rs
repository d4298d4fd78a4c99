//! Document store abstraction.
//!
//! A store is a single collection of BSON documents supporting the handful of
//! operations the animal service needs. `MongoStore` talks to MongoDB;
//! `MemoryStore` keeps documents in process for local runs and tests.

use std::sync::Arc;

use async_trait::async_trait;
use bson::{oid::ObjectId, Document};
use configs::DatabaseConfig;
use thiserror::Error;
use tracing::info;

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate identifier: {0}")]
    DuplicateId(ObjectId),
    #[error("store returned a non-ObjectId identifier")]
    UnexpectedId,
    #[error("store backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist one document and return its identifier, assigning one if absent.
    async fn insert_one(&self, doc: Document) -> Result<ObjectId, StoreError>;
    /// Persist a batch; identifiers are returned in input order.
    async fn insert_many(&self, docs: Vec<Document>) -> Result<Vec<ObjectId>, StoreError>;
    /// Every document whose top-level fields equal those in `filter`.
    async fn find(&self, filter: Document) -> Result<Vec<Document>, StoreError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, StoreError>;
    /// Remove every document in the collection.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Open the store selected by `cfg.connection_string`.
pub async fn connect(cfg: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    if cfg.is_in_memory() {
        info!(collection = %cfg.collection, "using in-memory document store");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = MongoStore::connect(cfg).await?;
    Ok(Arc::new(store))
}
