use vigha::{
    core::{
        convert::ConversionInput,
        history::{HistoryLog, RecordOutcome},
    },
    entry::{CompositeInput, HistoryDraft},
    persist::{HistoryRepository, KvHistoryRepository, memory::MemoryKvStore},
    types::{AreaUnit, SourcePage},
};

fn home(value: f64, unit: AreaUnit) -> HistoryDraft {
    HistoryDraft::home(ConversionInput::new(value, unit))
}

fn composite(h: &str, a: &str, s: &str) -> HistoryDraft {
    HistoryDraft::seven_twelve(CompositeInput::new(h, a, s))
}

fn ids(log: &HistoryLog) -> Vec<String> {
    log.items().iter().map(|item| item.id.clone()).collect()
}

#[test]
fn same_home_value_twice_yields_one_entry() {
    let mut log = HistoryLog::new();
    let first = log.record_at(home(2.5, AreaUnit::Hectare), "t1".to_string());
    let second = log.record_at(home(2.5, AreaUnit::Hectare), "t2".to_string());

    assert_eq!(first, RecordOutcome::Recorded("t1".to_string()));
    assert_eq!(second, RecordOutcome::Duplicate);
    assert_eq!(log.len(), 1);
}

#[test]
fn different_unit_is_not_a_duplicate() {
    let mut log = HistoryLog::new();
    log.record_at(home(2.5, AreaUnit::Hectare), "t1".to_string());
    let out = log.record_at(home(2.5, AreaUnit::Are), "t2".to_string());
    assert_eq!(out, RecordOutcome::Recorded("t2".to_string()));
    assert_eq!(ids(&log), vec!["t2", "t1"]);
}

#[test]
fn composite_dedup_compares_raw_fields() {
    let mut log = HistoryLog::new();
    log.record_at(composite("1", "", ""), "t1".to_string());
    assert_eq!(
        log.record_at(composite("1", "", ""), "t2".to_string()),
        RecordOutcome::Duplicate
    );
    // Same total, different text.
    assert_eq!(
        log.record_at(composite("", "100", ""), "t3".to_string()),
        RecordOutcome::Recorded("t3".to_string())
    );
}

#[test]
fn equal_totals_across_pages_are_both_kept() {
    let mut log = HistoryLog::new();
    log.record_at(home(10000.0, AreaUnit::Sqm), "t1".to_string());
    let out = log.record_at(composite("1", "", ""), "t2".to_string());
    assert_eq!(out, RecordOutcome::Recorded("t2".to_string()));
    assert_eq!(log.len(), 2);
}

#[test]
fn fifteen_distinct_records_keep_newest_ten() {
    let mut log = HistoryLog::new();
    for i in 1..=15u32 {
        log.record_at(home(f64::from(i), AreaUnit::Sqm), format!("t{i:02}"));
    }

    assert_eq!(log.len(), 10);
    let expected: Vec<String> = (6..=15u32).rev().map(|i| format!("t{i:02}")).collect();
    assert_eq!(ids(&log), expected);
    assert_eq!(log.items()[0].input.value, 15.0);
}

#[test]
fn capacity_is_shared_across_pages() {
    let mut log = HistoryLog::with_capacity(3);
    log.record_at(composite("1", "", ""), "a".to_string());
    log.record_at(home(1.0, AreaUnit::Are), "b".to_string());
    log.record_at(home(2.0, AreaUnit::Are), "c".to_string());
    log.record_at(home(3.0, AreaUnit::Are), "d".to_string());

    assert_eq!(ids(&log), vec!["d", "c", "b"]);
    assert!(log.for_page(SourcePage::SevenTwelve).is_empty());
}

#[test]
fn clear_is_scoped_to_one_page() {
    let mut log = HistoryLog::new();
    log.record_at(home(1.0, AreaUnit::Hectare), "a".to_string());
    log.record_at(composite("2", "", ""), "b".to_string());
    log.record_at(home(3.0, AreaUnit::Hectare), "c".to_string());

    assert_eq!(log.clear(SourcePage::Home), 2);
    assert_eq!(ids(&log), vec!["b"]);
    assert_eq!(log.items()[0].page(), SourcePage::SevenTwelve);

    assert_eq!(log.clear(SourcePage::Home), 0);
}

#[test]
fn colliding_ids_get_a_suffix() {
    let mut log = HistoryLog::new();
    log.record_at(home(1.0, AreaUnit::Sqm), "ts".to_string());
    log.record_at(home(2.0, AreaUnit::Sqm), "ts".to_string());
    log.record_at(home(3.0, AreaUnit::Sqm), "ts".to_string());
    assert_eq!(ids(&log), vec!["ts-2", "ts-1", "ts"]);
}

#[test]
fn generated_ids_are_timestamps() {
    let mut log = HistoryLog::new();
    let RecordOutcome::Recorded(id) = log.record(home(1.0, AreaUnit::Sqm)) else {
        panic!("expected record");
    };
    assert!(id.ends_with('Z'), "{id}");
    assert!(chrono::DateTime::parse_from_rfc3339(&id).is_ok(), "{id}");
}

#[test]
fn from_items_truncates_oversized_history() {
    let mut big = HistoryLog::with_capacity(20);
    for i in 0..20u32 {
        big.record_at(home(f64::from(i) + 1.0, AreaUnit::Sqm), format!("t{i}"));
    }
    let log = HistoryLog::from_items(big.items_cloned(), 10);
    assert_eq!(log.len(), 10);
    assert_eq!(log.items()[0].id, "t19");
}

#[test]
fn non_positive_values_are_rejected() {
    let mut log = HistoryLog::new();
    for bad in [f64::NAN, f64::INFINITY, 0.0, -2.0] {
        assert_eq!(log.record_at(home(bad, AreaUnit::Hectare), "t".to_string()), RecordOutcome::Rejected);
    }
    assert_eq!(
        log.record_at(composite("", "", ""), "t".to_string()),
        RecordOutcome::Rejected
    );
    assert!(log.is_empty());
}

#[test]
fn rejected_nan_does_not_poison_the_stored_history() {
    let mut log = HistoryLog::new();
    log.record_at(home(2.5, AreaUnit::Hectare), "t1".to_string());
    log.record_at(composite("1", "", ""), "t2".to_string());
    log.record_at(home(f64::NAN, AreaUnit::Hectare), "t3".to_string());
    log.record_at(home(f64::NAN, AreaUnit::Hectare), "t4".to_string());
    assert_eq!(log.len(), 2);

    let mut repo = KvHistoryRepository::new(MemoryKvStore::new());
    repo.persist(log.items()).expect("persist");
    let loaded = repo.load();
    assert_eq!(loaded, log.items_cloned());
}
