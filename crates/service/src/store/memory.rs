use std::sync::Arc;

use async_trait::async_trait;
use bson::{oid::ObjectId, Document};
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};
use models::document::ID_FIELD;

/// In-process document collection.
///
/// Documents are kept in insertion order. Inserts assign an ObjectId when the
/// document has none, matching the MongoDB driver.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

fn ensure_id(doc: &mut Document) -> Result<ObjectId, StoreError> {
    match doc.get(ID_FIELD) {
        Some(existing) => existing.as_object_id().ok_or(StoreError::UnexpectedId),
        None => {
            let id = ObjectId::new();
            doc.insert(ID_FIELD, id);
            Ok(id)
        }
    }
}

fn id_of(doc: &Document) -> Option<ObjectId> {
    doc.get_object_id(ID_FIELD).ok()
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(k, v)| doc.get(k) == Some(v))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, mut doc: Document) -> Result<ObjectId, StoreError> {
        let id = ensure_id(&mut doc)?;
        let mut docs = self.inner.write().await;
        if docs.iter().any(|d| id_of(d) == Some(id)) {
            return Err(StoreError::DuplicateId(id));
        }
        docs.push(doc);
        Ok(id)
    }

    async fn insert_many(&self, mut batch: Vec<Document>) -> Result<Vec<ObjectId>, StoreError> {
        let ids = batch
            .iter_mut()
            .map(ensure_id)
            .collect::<Result<Vec<_>, _>>()?;
        let mut docs = self.inner.write().await;
        // all-or-nothing: reject the whole batch on any clash
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) || docs.iter().any(|d| id_of(d) == Some(*id)) {
                return Err(StoreError::DuplicateId(*id));
            }
        }
        docs.extend(batch);
        Ok(ids)
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>, StoreError> {
        let docs = self.inner.read().await;
        Ok(docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, StoreError> {
        let docs = self.inner.read().await;
        Ok(docs.iter().find(|d| id_of(d) == Some(id)).cloned())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.inner.write().await.clear();
        Ok(())
    }
}
