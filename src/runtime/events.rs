//! Runtime event stream payloads.

use crate::types::{HistoryId, SourcePage};

/// Events emitted from the single-writer history loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// A new entry was prepended.
    Recorded {
        /// Assigned entry id.
        id: HistoryId,
        /// Originating page.
        page: SourcePage,
    },
    /// A candidate matched an existing entry and was dropped.
    DuplicateSuppressed {
        /// Originating page.
        page: SourcePage,
    },
    /// Entries of one page were removed.
    Cleared {
        /// Cleared page.
        page: SourcePage,
        /// Number of entries removed.
        removed: usize,
    },
    /// Writing the history back to the store failed.
    PersistFailed {
        /// Error text.
        message: String,
    },
}
