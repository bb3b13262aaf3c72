pub mod memory;
pub mod cloudflare;
#[cfg(feature = "mongodb")]
pub mod mongo;
