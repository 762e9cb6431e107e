use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use vigha::{
    config::Config,
    core::{convert::ConversionInput, history::RecordOutcome},
    entry::{CompositeInput, EntrySource, HistoryDraft, HistoryItem},
    persist::{HistoryRepository, KvHistoryRepository, PersistError, PersistResult, memory::MemoryKvStore},
    runtime::{
        events::HistoryEvent,
        handle::{HistoryHandle, RuntimeConfig, spawn_history},
    },
    types::{AreaUnit, SourcePage},
    view::{CompositeField, ConverterView, SevenTwelveView},
};

/// Repository that records every persisted snapshot.
#[derive(Clone, Default)]
struct RecordingRepo {
    initial: Vec<HistoryItem>,
    writes: Arc<Mutex<Vec<Vec<HistoryItem>>>>,
}

impl HistoryRepository for RecordingRepo {
    fn load(&mut self) -> Vec<HistoryItem> {
        self.initial.clone()
    }

    fn persist(&mut self, items: &[HistoryItem]) -> PersistResult<()> {
        self.writes.lock().expect("lock").push(items.to_vec());
        Ok(())
    }
}

struct FailingRepo;

impl HistoryRepository for FailingRepo {
    fn load(&mut self) -> Vec<HistoryItem> {
        Vec::new()
    }

    fn persist(&mut self, _items: &[HistoryItem]) -> PersistResult<()> {
        Err(PersistError::Message("disk full".to_string()))
    }
}

fn home(value: f64, unit: AreaUnit) -> HistoryDraft {
    HistoryDraft::home(ConversionInput::new(value, unit))
}

async fn memory_handle() -> HistoryHandle {
    spawn_history(
        Box::new(KvHistoryRepository::new(MemoryKvStore::new())),
        RuntimeConfig::default(),
    )
    .await
}

#[tokio::test]
async fn record_dedup_and_scoped_clear_through_handle() {
    let repo = RecordingRepo::default();
    let writes = Arc::clone(&repo.writes);
    let handle = spawn_history(Box::new(repo), RuntimeConfig::default()).await;

    let first = handle.record(home(2.5, AreaUnit::Hectare)).await.expect("record");
    assert!(matches!(first, RecordOutcome::Recorded(_)));
    let again = handle.record(home(2.5, AreaUnit::Hectare)).await.expect("record");
    assert_eq!(again, RecordOutcome::Duplicate);

    handle
        .record(HistoryDraft::seven_twelve(CompositeInput::new("1", "", "")))
        .await
        .expect("record");

    assert_eq!(handle.snapshot().await.expect("snapshot").len(), 2);
    // Duplicates are not written back.
    assert_eq!(writes.lock().expect("lock").len(), 2);

    let removed = handle.clear(SourcePage::Home).await.expect("clear");
    assert_eq!(removed, 1);
    let left = handle.snapshot().await.expect("snapshot");
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].page(), SourcePage::SevenTwelve);

    let last_write = writes.lock().expect("lock").last().cloned().expect("write");
    assert_eq!(last_write, left);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn runtime_rejects_nan_without_persisting() {
    let repo = RecordingRepo::default();
    let writes = Arc::clone(&repo.writes);
    let handle = spawn_history(Box::new(repo), RuntimeConfig::default()).await;

    let out = handle.record(home(f64::NAN, AreaUnit::Sqm)).await.expect("record");
    assert_eq!(out, RecordOutcome::Rejected);
    assert!(handle.snapshot().await.expect("snapshot").is_empty());
    assert!(writes.lock().expect("lock").is_empty());

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn events_follow_mutations() {
    let handle = memory_handle().await;
    let mut sub = handle.subscribe();

    let RecordOutcome::Recorded(id) = handle.record(home(1.0, AreaUnit::Are)).await.expect("record") else {
        panic!("expected record");
    };
    handle.record(home(1.0, AreaUnit::Are)).await.expect("record");
    handle.clear(SourcePage::Home).await.expect("clear");

    let mut seen = Vec::new();
    for _ in 0..3 {
        let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("event")
            .expect("recv");
        seen.push(evt);
    }

    assert_eq!(
        seen,
        vec![
            HistoryEvent::Recorded { id, page: SourcePage::Home },
            HistoryEvent::DuplicateSuppressed { page: SourcePage::Home },
            HistoryEvent::Cleared { page: SourcePage::Home, removed: 1 },
        ]
    );

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn persist_failure_keeps_in_memory_state() {
    let handle = spawn_history(Box::new(FailingRepo), RuntimeConfig::default()).await;
    let mut sub = handle.subscribe();

    handle.record(home(4.0, AreaUnit::Sqm)).await.expect("record");

    let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event")
        .expect("recv");
    assert!(matches!(evt, HistoryEvent::PersistFailed { .. }), "{evt:?}");
    assert_eq!(handle.snapshot().await.expect("snapshot").len(), 1);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn startup_loads_and_truncates_stored_items() {
    let mut seed = vigha::core::history::HistoryLog::with_capacity(12);
    for i in 1..=12u32 {
        seed.record_at(home(f64::from(i), AreaUnit::Sqm), format!("t{i:02}"));
    }
    let repo = RecordingRepo {
        initial: seed.items_cloned(),
        ..RecordingRepo::default()
    };
    let handle = spawn_history(Box::new(repo), RuntimeConfig::default()).await;

    let items = handle.snapshot().await.expect("snapshot");
    assert_eq!(items.len(), 10);
    assert_eq!(items[0].id, "t12");
    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn handle_reports_closed_runtime() {
    let handle = memory_handle().await;
    handle.shutdown().await.expect("shutdown");
    tokio::task::yield_now().await;
    assert!(handle.snapshot().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn converter_view_records_only_the_settled_value() {
    let handle = memory_handle().await;
    let mut view = ConverterView::new(handle.clone(), Duration::from_millis(1000));

    for text in ["2", "2.", "2.5"] {
        assert!(view.set_value(text));
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    assert!(!view.set_value("2.5.1"));
    assert_eq!(view.value(), "2.5");
    assert!(view.has_pending_record());

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let items = view.history().await.expect("history");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].input, ConversionInput::new(2.5, AreaUnit::Hectare));
    assert_eq!(items[0].source, EntrySource::Home);
    assert_eq!(view.result().map(|r| r.sqm), Some(25000.0));

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn unit_change_reschedules_and_zero_cancels() {
    let handle = memory_handle().await;
    let mut view = ConverterView::new(handle.clone(), Duration::from_millis(1000));

    view.set_value("3");
    tokio::time::sleep(Duration::from_millis(500)).await;
    view.set_unit(AreaUnit::Are);
    tokio::time::sleep(Duration::from_millis(1500)).await;

    view.set_value("0");
    assert!(view.result().is_none());
    assert!(!view.has_pending_record());
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let items = view.history().await.expect("history");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].input.unit, AreaUnit::Are);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn teardown_and_drop_cancel_pending_records() {
    let handle = memory_handle().await;

    let mut view = ConverterView::new(handle.clone(), Duration::from_millis(1000));
    view.set_value("7");
    view.teardown();
    assert!(!view.has_pending_record());

    {
        let mut composite = SevenTwelveView::new(handle.clone(), Duration::from_millis(1000), 4);
        composite.set_field(CompositeField::Hectare, "1");
    }

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(handle.snapshot().await.expect("snapshot").is_empty());

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn composite_view_records_raw_triple() {
    let handle = memory_handle().await;
    let mut view = SevenTwelveView::new(handle.clone(), Duration::from_millis(1000), 4);

    assert!(view.set_field(CompositeField::Hectare, "1"));
    assert!(view.set_field(CompositeField::Are, "20"));
    assert!(!view.set_field(CompositeField::Sqm, "12345"));
    assert_eq!(view.total_sqm(), 12000.0);
    tokio::time::sleep(Duration::from_millis(1200)).await;

    // Re-entering the same triple is suppressed.
    assert!(view.set_field(CompositeField::Are, "20"));
    tokio::time::sleep(Duration::from_millis(1200)).await;

    let items = view.history().await.expect("history");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].input, ConversionInput::new(12000.0, AreaUnit::Sqm));
    assert_eq!(
        items[0].source,
        EntrySource::SevenTwelve {
            raw: CompositeInput::new("1", "20", "")
        }
    );

    assert_eq!(view.clear_history().await.expect("clear"), 1);
    handle.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn views_take_delay_and_digit_bound_from_config() {
    let handle = memory_handle().await;
    let mut cfg = Config::default();
    cfg.history.debounce_ms = 250;
    cfg.input.max_integer_digits = 2;

    let mut view = ConverterView::from_config(handle.clone(), &cfg);
    assert_eq!(view.debounce_delay(), Duration::from_millis(250));
    view.set_value("4");
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(view.history().await.expect("history").len(), 1);

    let mut composite = SevenTwelveView::from_config(handle.clone(), &cfg);
    assert_eq!(composite.debounce_delay(), Duration::from_millis(250));
    assert_eq!(composite.max_integer_digits(), 2);
    assert!(!composite.set_field(CompositeField::Hectare, "123"));
    assert!(composite.set_field(CompositeField::Hectare, "12"));
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(composite.history().await.expect("history").len(), 1);

    handle.shutdown().await.expect("shutdown");
}
