mod client;

pub use client::{WorkersAiClient, WorkersAiClientBuilder, DEFAULT_API_BASE};
