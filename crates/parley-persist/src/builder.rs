use std::sync::Arc;

use crate::dbs::cloudflare::{CloudflareKvConfig, CloudflareKvStore};
use crate::dbs::memory::MemoryStore;
use crate::error::Result;
use crate::store::KvStore;

/// Which store backs session history
#[derive(Debug, Clone)]
pub enum StoreBackend {
    Memory,
    CloudflareKv(CloudflareKvConfig),
    #[cfg(feature = "mongodb")]
    MongoDb {
        uri: String,
        database: String,
        collection: String,
    },
}

impl StoreBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::CloudflareKv(_) => "cloudflare_kv",
            #[cfg(feature = "mongodb")]
            StoreBackend::MongoDb { .. } => "mongodb",
        }
    }

    /// Open the backend, connecting if it is remote
    pub async fn connect(self) -> Result<Arc<dyn KvStore>> {
        let store: Arc<dyn KvStore> = match self {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::CloudflareKv(config) => Arc::new(CloudflareKvStore::new(config)?),
            #[cfg(feature = "mongodb")]
            StoreBackend::MongoDb { uri, database, collection } => Arc::new(
                crate::dbs::mongo::MongoKvStore::connect(&uri, &database, &collection).await?,
            ),
        };
        Ok(store)
    }
}
