mod client;

pub use client::{CloudflareKvConfig, CloudflareKvStore, DEFAULT_API_BASE};
