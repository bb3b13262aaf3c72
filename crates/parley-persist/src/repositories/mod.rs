pub mod history;

pub use history::{HistoryRepository, retain_most_recent, MAX_STORED_TURNS, SESSION_KEY_PREFIX};
