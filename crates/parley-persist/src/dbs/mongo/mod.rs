mod client;

pub use client::MongoKvStore;
