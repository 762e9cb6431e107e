use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, mpsc, oneshot};

use crate::{
    core::history::{DEFAULT_CAPACITY, HistoryLog, RecordOutcome},
    entry::{HistoryDraft, HistoryItem},
    persist::{HistoryRepository, PersistError},
    types::SourcePage,
};

use super::events::HistoryEvent;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("history runtime is not running")]
    ChannelClosed,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Entries kept across all pages.
    pub capacity: usize,
    pub command_queue_bound: usize,
    pub event_buffer: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            command_queue_bound: 64,
            event_buffer: 256,
        }
    }
}

type SharedRepo = Arc<Mutex<Box<dyn HistoryRepository>>>;

pub struct HistoryHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<HistoryEvent>,
}

impl Clone for HistoryHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Record {
        draft: HistoryDraft,
        resp: oneshot::Sender<RecordOutcome>,
    },
    Clear {
        page: SourcePage,
        resp: oneshot::Sender<usize>,
    },
    Snapshot {
        resp: oneshot::Sender<Vec<HistoryItem>>,
    },
    ForPage {
        page: SourcePage,
        resp: oneshot::Sender<Vec<HistoryItem>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Loads the stored history and spawns the single-writer loop that owns it.
///
/// Must be called from within a tokio runtime.
pub async fn spawn_history(
    repo: Box<dyn HistoryRepository>,
    config: RuntimeConfig,
) -> HistoryHandle {
    let repo: SharedRepo = Arc::new(Mutex::new(repo));
    let items = {
        let repo = Arc::clone(&repo);
        match tokio::task::spawn_blocking(move || repo.blocking_lock().load()).await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!("history load task failed, starting empty: {err}");
                Vec::new()
            }
        }
    };
    let log = HistoryLog::from_items(items, config.capacity);
    tracing::info!(entries = log.len(), "history runtime started");

    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<HistoryEvent>(config.event_buffer);
    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut log = log;
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut log, &repo, &events_tx_loop).await {
                break;
            }
        }
        tracing::info!("history runtime stopped");
    });

    HistoryHandle { cmd_tx, events_tx }
}

impl HistoryHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.events_tx.subscribe()
    }

    /// Records `draft` unless the page already holds a matching entry or the
    /// value is not a finite positive number.
    pub async fn record(&self, draft: HistoryDraft) -> Result<RecordOutcome, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Record { draft, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Removes every entry of `page`; returns how many were removed.
    pub async fn clear(&self, page: SourcePage) -> Result<usize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Clear { page, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// All entries, newest first.
    pub async fn snapshot(&self) -> Result<Vec<HistoryItem>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Snapshot { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Entries of one page, newest first.
    pub async fn for_page(&self, page: SourcePage) -> Result<Vec<HistoryItem>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ForPage { page, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

async fn handle_command(
    cmd: Command,
    log: &mut HistoryLog,
    repo: &SharedRepo,
    events_tx: &broadcast::Sender<HistoryEvent>,
) -> bool {
    match cmd {
        Command::Record { draft, resp } => {
            let page = draft.page();
            let outcome = log.record(draft);
            match &outcome {
                RecordOutcome::Recorded(id) => {
                    tracing::debug!(%id, %page, "history entry recorded");
                    persist(log, repo, events_tx).await;
                    let _ = events_tx.send(HistoryEvent::Recorded {
                        id: id.clone(),
                        page,
                    });
                }
                RecordOutcome::Duplicate => {
                    tracing::debug!(%page, "duplicate history entry suppressed");
                    let _ = events_tx.send(HistoryEvent::DuplicateSuppressed { page });
                }
                RecordOutcome::Rejected => {
                    tracing::warn!(%page, "history entry with non-positive value rejected");
                }
            }
            let _ = resp.send(outcome);
        }
        Command::Clear { page, resp } => {
            let removed = log.clear(page);
            tracing::debug!(%page, removed, "history cleared");
            persist(log, repo, events_tx).await;
            let _ = events_tx.send(HistoryEvent::Cleared { page, removed });
            let _ = resp.send(removed);
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(log.items_cloned());
        }
        Command::ForPage { page, resp } => {
            let _ = resp.send(log.for_page_cloned(page));
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

async fn persist(log: &HistoryLog, repo: &SharedRepo, events_tx: &broadcast::Sender<HistoryEvent>) {
    let items = log.items_cloned();
    let repo = Arc::clone(repo);
    let result = tokio::task::spawn_blocking(move || repo.blocking_lock().persist(&items))
        .await
        .map_err(|e| PersistError::Message(format!("join error: {e}")))
        .and_then(|inner| inner);

    if let Err(err) = result {
        tracing::warn!("history persist failed, keeping in-memory state: {err}");
        let _ = events_tx.send(HistoryEvent::PersistFailed {
            message: err.to_string(),
        });
    }
}
