use async_trait::async_trait;
use bson::doc;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::error::{PersistError, Result};
use crate::store::KvStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct KvDocument {
    #[serde(rename = "_id")]
    key: String,
    value: String,
}

/// One document per key: `{ _id: key, value: "..." }`
pub struct MongoKvStore {
    collection: Collection<KvDocument>,
}

impl MongoKvStore {
    /// Connect to MongoDB and bind the collection holding the entries
    pub async fn connect(mongodb_uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self {
            collection: client.database(database).collection(collection),
        })
    }
}

#[async_trait]
impl KvStore for MongoKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let document = self.collection.find_one(doc! { "_id": key }).await?;
        Ok(document.map(|d| d.value))
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let document = KvDocument {
            key: key.to_string(),
            value,
        };

        self.collection
            .replace_one(doc! { "_id": key }, &document)
            .upsert(true)
            .await?;
        Ok(())
    }
}
