use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use configs::DatabaseConfig;
use mongodb::{options::ClientOptions, Client, Collection};
use tracing::{info, instrument};

use super::{DocumentStore, StoreError};

fn backend(e: mongodb::error::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// MongoDB-backed collection. The driver pools connections internally, so one
/// instance is shared by every request.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Connect and ping the target database so a bad connection string fails at startup.
    #[instrument(skip(cfg), fields(database = %cfg.database_name, collection = %cfg.collection))]
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, StoreError> {
        let timeout = Duration::from_secs(cfg.connect_timeout_secs);
        let mut opts = ClientOptions::parse(&cfg.connection_string).await.map_err(backend)?;
        opts.connect_timeout = Some(timeout);
        opts.server_selection_timeout = Some(timeout);
        opts.app_name.get_or_insert_with(|| "animal-api".to_string());

        let client = Client::with_options(opts).map_err(backend)?;
        let db = client.database(&cfg.database_name);
        db.run_command(doc! { "ping": 1 }, None).await.map_err(backend)?;
        info!("connected to mongodb");

        Ok(Self { collection: db.collection(&cfg.collection) })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, doc: Document) -> Result<ObjectId, StoreError> {
        let res = self.collection.insert_one(doc, None).await.map_err(backend)?;
        res.inserted_id.as_object_id().ok_or(StoreError::UnexpectedId)
    }

    async fn insert_many(&self, docs: Vec<Document>) -> Result<Vec<ObjectId>, StoreError> {
        if docs.is_empty() {
            return Ok(Vec::new());
        }
        let n = docs.len();
        let res = self.collection.insert_many(docs, None).await.map_err(backend)?;
        (0..n)
            .map(|i| {
                res.inserted_ids
                    .get(&i)
                    .and_then(Bson::as_object_id)
                    .ok_or(StoreError::UnexpectedId)
            })
            .collect()
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>, StoreError> {
        let mut cursor = self.collection.find(filter, None).await.map_err(backend)?;
        let mut docs = Vec::new();
        while cursor.advance().await.map_err(backend)? {
            docs.push(cursor.deserialize_current().map_err(backend)?);
        }
        Ok(docs)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, StoreError> {
        self.collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(backend)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.collection.drop(None).await.map_err(backend)
    }
}
