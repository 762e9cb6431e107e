//! Gujarat land-area conversion with a bounded, persisted conversion history.
//!
//! # Examples
//!
//! Pure conversion with [`core::convert::convert_area`]:
//! ```
//! use vigha::{
//!     core::convert::{convert_area, ConversionInput},
//!     types::AreaUnit,
//! };
//!
//! let r = convert_area(ConversionInput::new(1.0, AreaUnit::Hectare));
//! assert_eq!(r.sqm, 10000.0);
//! assert_eq!(r.are, 100.0);
//! ```
//!
//! In-memory history with [`core::history::HistoryLog`]:
//! ```
//! use vigha::{
//!     core::{convert::ConversionInput, history::{HistoryLog, RecordOutcome}},
//!     entry::HistoryDraft,
//!     types::AreaUnit,
//! };
//!
//! let mut log = HistoryLog::new();
//! let draft = HistoryDraft::home(ConversionInput::new(2.5, AreaUnit::Hectare));
//! assert!(matches!(log.record(draft.clone()), RecordOutcome::Recorded(_)));
//! assert_eq!(log.record(draft), RecordOutcome::Duplicate);
//! assert_eq!(log.len(), 1);
//! ```
//!
//! Runtime usage with a SQLite store:
//! ```no_run
//! use vigha::{
//!     core::convert::ConversionInput,
//!     entry::HistoryDraft,
//!     persist::{sqlite::SqliteKvStore, KvHistoryRepository},
//!     runtime::handle::{spawn_history, RuntimeConfig},
//!     types::AreaUnit,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = SqliteKvStore::open("vigha.db").expect("open sqlite");
//! let handle = spawn_history(
//!     Box::new(KvHistoryRepository::new(store)),
//!     RuntimeConfig::default(),
//! ).await;
//! handle
//!     .record(HistoryDraft::home(ConversionInput::new(3.0, AreaUnit::Are)))
//!     .await
//!     .expect("record");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```

/// On-screen calculator.
pub mod calc;
/// File and environment configuration.
pub mod config;
/// Conversion engine and history log.
pub mod core;
/// History entry records and drafts.
pub mod entry;
/// Key-value persistence and the history repository.
pub mod persist;
/// Single-writer history runtime and debounce timers.
pub mod runtime;
/// Regional-standard suggestion service.
pub mod suggest;
/// Shared primitive types and enums.
pub mod types;
/// Input views.
pub mod view;
