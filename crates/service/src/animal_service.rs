use std::sync::Arc;

use bson::Document;
use models::{
    document::{self, KIND_FIELD},
    errors::ModelError,
    Animal, AnimalRecord,
};
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::store::DocumentStore;

/// Single point of access to the shared animal collection.
///
/// Cheap to clone; every clone shares the same store handle.
#[derive(Clone)]
pub struct AnimalService {
    store: Arc<dyn DocumentStore>,
}

impl AnimalService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self { Self { store } }

    /// Persist `record` and write the store-assigned id back into it.
    #[instrument(skip_all, fields(kind = %T::KIND))]
    pub async fn insert_one<T: AnimalRecord>(&self, record: &mut T) -> Result<(), ServiceError> {
        let doc = document::to_document(record)?;
        let id = self.store.insert_one(doc).await?;
        record.base_mut().id = Some(id.to_hex());
        info!(id = %id, "animal_inserted");
        Ok(())
    }

    /// Persist a mixed batch; every record gets its id on success.
    #[instrument(skip_all, fields(count = records.len()))]
    pub async fn insert_many(&self, records: &mut [Animal]) -> Result<(), ServiceError> {
        let docs = records
            .iter()
            .map(Animal::to_document)
            .collect::<Result<Vec<_>, _>>()?;
        let ids = self.store.insert_many(docs).await?;
        for (record, id) in records.iter_mut().zip(ids) {
            record.base_mut().id = Some(id.to_hex());
        }
        info!("animals_inserted");
        Ok(())
    }

    /// Every stored record of shape `T`. Documents that do not decode as `T` are skipped.
    #[instrument(skip_all, fields(kind = %T::KIND))]
    pub async fn find_all<T: AnimalRecord>(&self) -> Result<Vec<T>, ServiceError> {
        let mut filter = Document::new();
        filter.insert(KIND_FIELD, T::KIND.as_str());
        let docs = self.store.find(filter).await?;

        let mut records = Vec::with_capacity(docs.len());
        for doc in docs {
            match document::from_document::<T>(doc) {
                Ok(r) => records.push(r),
                Err(e) => warn!(error = %e, "skipping undecodable document"),
            }
        }
        debug!(count = records.len(), "animals_listed");
        Ok(records)
    }

    /// The record of shape `T` with identifier `id`.
    ///
    /// A malformed id yields `InvalidIdentifier`; an unknown id, one that
    /// belongs to another kind, or one whose document `find_all` would skip,
    /// yields `NotFound`.
    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn find_by_id<T: AnimalRecord>(&self, id: &str) -> Result<T, ServiceError> {
        let oid = document::parse_object_id(id)
            .map_err(|_| ServiceError::InvalidIdentifier(id.to_string()))?;
        let doc = self
            .store
            .find_by_id(oid)
            .await?
            .ok_or_else(|| ServiceError::not_found(T::KIND, id))?;
        match document::from_document::<T>(doc) {
            Ok(record) => Ok(record),
            Err(ModelError::KindMismatch { .. }) => Err(ServiceError::not_found(T::KIND, id)),
            Err(e) => {
                warn!(error = %e, "stored document does not decode; treating as missing");
                Err(ServiceError::not_found(T::KIND, id))
            }
        }
    }

    /// Drop every stored animal.
    pub async fn clear(&self) -> Result<(), ServiceError> {
        self.store.clear().await?;
        Ok(())
    }
}
