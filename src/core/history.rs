use chrono::{SecondsFormat, Utc};

use crate::{
    entry::{HistoryDraft, HistoryItem},
    types::{HistoryId, SourcePage},
};

/// Default number of entries retained across all pages.
pub const DEFAULT_CAPACITY: usize = 10;

/// Result of [`HistoryLog::record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Candidate was prepended under this id.
    Recorded(HistoryId),
    /// An entry with the same key already exists for the page.
    Duplicate,
    /// The input value is not a finite positive number.
    Rejected,
}

/// Bounded, newest-first conversion history shared by all views.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    items: Vec<HistoryItem>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuilds a log from persisted items, keeping at most `capacity`.
    pub fn from_items(mut items: Vec<HistoryItem>, capacity: usize) -> Self {
        items.truncate(capacity);
        Self { items, capacity }
    }

    pub fn record(&mut self, draft: HistoryDraft) -> RecordOutcome {
        self.record_at(draft, now_id())
    }

    /// Same as [`record`](Self::record) with a caller-supplied id stem.
    pub fn record_at(&mut self, draft: HistoryDraft, id: HistoryId) -> RecordOutcome {
        // NaN never matches itself and serializes as `null`, which would make
        // the whole stored array unreadable.
        let value = draft.input.value;
        if !(value.is_finite() && value > 0.0) {
            return RecordOutcome::Rejected;
        }

        let page = draft.page();
        if self
            .items
            .iter()
            .any(|item| item.page() == page && item.matches(&draft))
        {
            return RecordOutcome::Duplicate;
        }

        let id = self.unique_id(id);
        let item = HistoryItem {
            id: id.clone(),
            input: draft.input,
            result: draft.result,
            source: draft.source,
        };
        self.items.insert(0, item);
        self.items.truncate(self.capacity);
        RecordOutcome::Recorded(id)
    }

    /// Removes every entry of `page`; returns how many were removed.
    pub fn clear(&mut self, page: SourcePage) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.page() != page);
        before - self.items.len()
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn items_cloned(&self) -> Vec<HistoryItem> {
        self.items.clone()
    }

    pub fn for_page(&self, page: SourcePage) -> Vec<&HistoryItem> {
        self.items.iter().filter(|item| item.page() == page).collect()
    }

    pub fn for_page_cloned(&self, page: SourcePage) -> Vec<HistoryItem> {
        self.for_page(page).into_iter().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn unique_id(&self, stem: HistoryId) -> HistoryId {
        if self.get(&stem).is_none() {
            return stem;
        }
        let mut n = 1usize;
        loop {
            let candidate = format!("{stem}-{n}");
            if self.get(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

fn now_id() -> HistoryId {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
