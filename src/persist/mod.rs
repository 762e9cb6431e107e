pub mod memory;
pub mod sqlite;

use crate::entry::HistoryItem;

/// Fixed key under which the history array is stored.
pub const HISTORY_KEY: &str = "conversionHistory";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Synchronous string key-value store.
pub trait KvStore: Send {
    fn get(&self, key: &str) -> PersistResult<Option<String>>;
    /// Overwrites any prior value for `key`.
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;
}

/// Load/persist seam between the history runtime and storage.
pub trait HistoryRepository: Send {
    /// Reads the stored history. Never fails; unreadable state loads as empty.
    fn load(&mut self) -> Vec<HistoryItem>;
    /// Overwrites the stored history with `items`.
    fn persist(&mut self, items: &[HistoryItem]) -> PersistResult<()>;
}

/// [`HistoryRepository`] that keeps the history as one JSON array under
/// [`HISTORY_KEY`] in a [`KvStore`].
pub struct KvHistoryRepository<S: KvStore> {
    store: S,
}

impl<S: KvStore> KvHistoryRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KvStore> HistoryRepository for KvHistoryRepository<S> {
    fn load(&mut self) -> Vec<HistoryItem> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!("failed to read history from store: {err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryItem>>(&raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!("failed to parse stored history, starting empty: {err}");
                Vec::new()
            }
        }
    }

    fn persist(&mut self, items: &[HistoryItem]) -> PersistResult<()> {
        let payload = serde_json::to_string(items)?;
        self.store.set(HISTORY_KEY, &payload)
    }
}
