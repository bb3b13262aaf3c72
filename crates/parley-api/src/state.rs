use std::sync::Arc;
use parley_llm::InferenceClient;
use parley_persist::{HistoryRepository, KvStore};
use crate::config::Config;
use crate::service::ChatService;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chat: ChatService,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn KvStore>,
        inference: Arc<dyn InferenceClient>,
    ) -> Self {
        let chat = ChatService::new(HistoryRepository::new(store), inference)
            .reset_on_corrupt(config.history.reset_on_corrupt);

        Self {
            config: Arc::new(config),
            chat,
        }
    }
}
