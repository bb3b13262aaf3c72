pub mod models;
pub mod store;
pub mod dbs;
pub mod repositories;
pub mod error;
pub mod builder;

pub use models::{Turn, Role};
pub use store::KvStore;
pub use dbs::memory::MemoryStore;
pub use dbs::cloudflare::{CloudflareKvConfig, CloudflareKvStore};
#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoKvStore;
pub use repositories::{HistoryRepository, retain_most_recent, MAX_STORED_TURNS, SESSION_KEY_PREFIX};
pub use error::PersistError;
pub use builder::StoreBackend;
