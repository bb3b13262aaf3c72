pub mod traits;
pub mod config;
pub mod workers_ai;

pub use traits::{
    InferenceClient,
    InferenceRequest, InferenceOptions, InferenceOutput,
    TokenUsage,
};

pub use config::{ClientFactory, WorkersAiConfig};
pub use workers_ai::{WorkersAiClient, WorkersAiClientBuilder};
