use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[cfg(feature = "mongodb")]
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store returned {status}: {body}")]
    Store { status: u16, body: String },

    #[error("History under `{key}` is corrupt: {source}")]
    HistoryCorrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl PersistError {
    pub fn is_history_corrupt(&self) -> bool {
        matches!(self, PersistError::HistoryCorrupt { .. })
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;
