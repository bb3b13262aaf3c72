use std::sync::Arc;

use crate::error::{PersistError, Result};
use crate::models::Turn;
use crate::store::KvStore;

pub const SESSION_KEY_PREFIX: &str = "session:";

/// Hard cap on persisted turns per session
pub const MAX_STORED_TURNS: usize = 30;

/// Load and save per-session history on top of a [`KvStore`]
///
/// The stored value is a JSON array of `{role, content}` objects under
/// `session:{session_id}`. Every save keeps at most `max_turns` entries,
/// dropping the oldest first.
#[derive(Clone)]
pub struct HistoryRepository {
    store: Arc<dyn KvStore>,
    max_turns: usize,
}

impl HistoryRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            max_turns: MAX_STORED_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn session_key(session_id: &str) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, session_id)
    }

    /// Fetch the history for a session
    ///
    /// Absent (or empty) values yield an empty history. A value that does not
    /// parse as a turn array is reported as [`PersistError::HistoryCorrupt`].
    pub async fn load(&self, session_id: &str) -> Result<Vec<Turn>> {
        let key = Self::session_key(session_id);

        match self.store.get(&key).await? {
            Some(raw) if !raw.is_empty() => serde_json::from_str(&raw)
                .map_err(|source| PersistError::HistoryCorrupt { key, source }),
            _ => Ok(Vec::new()),
        }
    }

    /// Trim to the most recent turns and overwrite the stored value
    ///
    /// Returns the number of turns written.
    pub async fn save(&self, session_id: &str, mut history: Vec<Turn>) -> Result<usize> {
        let dropped = retain_most_recent(&mut history, self.max_turns);
        if dropped > 0 {
            tracing::debug!(session_id, dropped, "Trimmed oldest turns before save");
        }

        let value = serde_json::to_string(&history)?;
        self.store.put(&Self::session_key(session_id), value).await?;

        Ok(history.len())
    }
}

/// Drop turns from the front until at most `max` remain. Returns how many were dropped.
pub fn retain_most_recent(history: &mut Vec<Turn>, max: usize) -> usize {
    let excess = history.len().saturating_sub(max);
    history.drain(..excess);
    excess
}
