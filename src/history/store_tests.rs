//! Tests for FilterHistoryStore

use std::sync::Arc;

use super::*;
use crate::error::{Result, SuggestError};
use crate::history::BackgroundStore;
use crate::matching::MatchRange;
use crate::test_utils::test_helpers::{StepClock, filter as f, start_time, test_store as store};

/// Clock stuck at one instant
struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        start_time()
    }
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(SuggestError::Io("permission denied".to_string()))
    }

    fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
        Err(SuggestError::Io("permission denied".to_string()))
    }
}

fn displays(matches: &[HistoryMatch]) -> Vec<&str> {
    matches.iter().map(|m| m.display.as_str()).collect()
}

#[test]
fn test_new_store_is_empty() {
    let store = store();
    assert!(store.is_empty());
    assert!(store.search("").is_empty());
}

#[test]
fn test_record_usage_inserts_at_head() {
    let mut store = store();
    store.record_usage(f("set=7ED"));
    store.record_usage(f("mv>=4"));

    let order: Vec<String> = store.entries().iter().map(HistoryEntry::display).collect();
    assert_eq!(order, vec!["mv>=4", "set=7ED"]);
}

#[test]
fn test_record_usage_moves_existing_entry_without_duplicating() {
    let mut store = store();
    store.record_usage(f("set=7ED"));
    store.record_usage(f("mv>=4"));
    store.record_usage(f("set=7ED"));

    assert_eq!(store.len(), 2);
    assert_eq!(store.entries()[0].display(), "set=7ED");
}

#[test]
fn test_record_usage_preserves_pin_and_advances_timestamp() {
    let mut store = store();
    store.record_usage(f("set=7ED"));
    store.pin(&f("set=7ED"));
    let before = store.get(&f("set=7ED")).unwrap().last_used_at;
    store.record_usage(f("mv>=4"));

    store.record_usage(f("set=7ED"));

    let entry = store.get(&f("set=7ED")).unwrap();
    assert!(entry.is_pinned);
    assert!(entry.last_used_at > before);
    let newest = store.entries().iter().map(|e| e.last_used_at).max().unwrap();
    assert_eq!(entry.last_used_at, newest);
}

#[test]
fn test_timestamps_advance_even_when_clock_is_frozen() {
    let mut store =
        FilterHistoryStore::in_memory(&HistoryConfig::default()).with_clock(Box::new(FrozenClock));
    store.record_usage(f("a:1"));
    store.record_usage(f("b:1"));
    store.record_usage(f("a:1"));

    let a = store.get(&f("a:1")).unwrap().last_used_at;
    let b = store.get(&f("b:1")).unwrap().last_used_at;
    assert!(a > b);
}

#[test]
fn test_reusing_newest_entry_advances_timestamp_under_frozen_clock() {
    let mut store =
        FilterHistoryStore::in_memory(&HistoryConfig::default()).with_clock(Box::new(FrozenClock));
    store.record_usage(f("a:1"));
    let before = store.get(&f("a:1")).unwrap().last_used_at;

    store.record_usage(f("a:1"));
    let after = store.get(&f("a:1")).unwrap().last_used_at;

    assert_eq!(store.len(), 1);
    assert!(after > before);
}

#[test]
fn test_history_is_capped_at_most_recent_1000() {
    let mut store = store();
    for i in 0..1005 {
        store.record_usage(f(&format!("name:card{}", i)));
    }

    assert_eq!(store.len(), 1000);
    assert!(store.get(&f("name:card1004")).is_some());
    assert!(store.get(&f("name:card5")).is_some());
    assert!(store.get(&f("name:card4")).is_none());
    assert!(store.get(&f("name:card0")).is_none());
}

#[test]
fn test_custom_max_entries() {
    let config = HistoryConfig {
        max_entries: 3,
        recent_limit: 10,
    };
    let mut store = FilterHistoryStore::in_memory(&config).with_clock(Box::new(StepClock::new()));
    for text in ["a:1", "b:1", "c:1", "d:1"] {
        store.record_usage(f(text));
    }
    let order: Vec<String> = store.entries().iter().map(HistoryEntry::display).collect();
    assert_eq!(order, vec!["d:1", "c:1", "b:1"]);
}

#[test]
fn test_blank_search_returns_ten_most_recent_pinned_first() {
    let mut store = store();
    for i in 0..15 {
        store.record_usage(f(&format!("name:card{}", i)));
    }
    store.pin(&f("name:card2"));

    let results = store.search("   ");
    assert_eq!(results.len(), 10);
    assert_eq!(results[0].display, "name:card2");
    assert!(results[0].is_pinned);
    assert_eq!(results[1].display, "name:card14");
    assert_eq!(results[9].display, "name:card6");
    assert!(results.iter().all(|m| m.match_range.is_none()));
}

#[test]
fn test_search_scenario_pinned_then_recency() {
    let mut store = store();
    store.record_usage(f("power>3"));
    store.record_usage(f("set=7ED"));
    store.record_usage(f("mv>=4"));
    store.pin(&f("set=7ED"));

    assert_eq!(displays(&store.search("")), vec!["set=7ED", "mv>=4", "power>3"]);
}

#[test]
fn test_search_term_is_case_insensitive_with_ranges() {
    let mut store = store();
    store.record_usage(f("set=7ED"));
    store.record_usage(f("format:modern"));
    store.record_usage(f("type:goblin"));

    let results = store.search("ed");
    assert_eq!(displays(&results), vec!["set=7ED"]);
    assert_eq!(results[0].match_range, Some(MatchRange::new(5, 7)));

    let results = store.search("O");
    assert_eq!(displays(&results), vec!["type:goblin", "format:modern"]);
}

#[test]
fn test_search_orders_pinned_before_newer_unpinned() {
    let mut store = store();
    store.record_usage(f("type:elf"));
    store.record_usage(f("type:goblin"));
    store.record_usage(f("type:merfolk"));
    store.pin(&f("type:elf"));

    let results = store.search("type");
    assert_eq!(displays(&results), vec!["type:elf", "type:merfolk", "type:goblin"]);
}

#[test]
fn test_search_with_term_is_not_truncated() {
    let mut store = store();
    for i in 0..25 {
        store.record_usage(f(&format!("name:card{}", i)));
    }
    assert_eq!(store.search("card").len(), 25);
}

#[test]
fn test_pin_unpin_round_trip() {
    let mut store = store();
    store.record_usage(f("set=7ED"));

    assert!(store.pin(&f("set=7ED")));
    assert!(store.is_pinned(&f("set=7ED")));
    assert!(store.unpin(&f("set=7ED")));
    assert!(!store.is_pinned(&f("set=7ED")));
}

#[test]
fn test_pin_absent_filter_is_noop() {
    let mut store = store();
    store.record_usage(f("set=7ED"));
    assert!(!store.pin(&f("mv>=4")));
    assert!(!store.unpin(&f("mv>=4")));
    assert_eq!(store.len(), 1);
    assert!(!store.is_pinned(&f("mv>=4")));
}

#[test]
fn test_delete_removes_entry_from_search() {
    let mut store = store();
    store.record_usage(f("set=7ED"));
    store.record_usage(f("set=M21"));

    assert!(store.delete(&f("set=7ED")));
    assert!(!store.delete(&f("set=7ED")));
    assert_eq!(displays(&store.search("set")), vec!["set=M21"]);
    assert_eq!(displays(&store.search("")), vec!["set=M21"]);
}

#[test]
fn test_clear() {
    let mut store = store();
    store.record_usage(f("set=7ED"));
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_history_survives_reload() {
    let backend = Arc::new(MemoryStore::new());
    let config = HistoryConfig::default();
    {
        let mut store = FilterHistoryStore::load(Box::new(Arc::clone(&backend)), &config)
            .with_clock(Box::new(StepClock::new()));
        store.record_usage(f("power>3"));
        store.record_usage(f("set=7ED"));
        store.pin(&f("set=7ED"));
    }

    let reloaded = FilterHistoryStore::load(Box::new(Arc::clone(&backend)), &config);
    let order: Vec<String> = reloaded.entries().iter().map(HistoryEntry::display).collect();
    assert_eq!(order, vec!["set=7ED", "power>3"]);
    assert!(reloaded.is_pinned(&f("set=7ED")));
    assert!(!reloaded.is_pinned(&f("power>3")));
    assert_eq!(
        reloaded.get(&f("set=7ED")).unwrap().last_used_at,
        start_time() + Duration::seconds(1)
    );
}

#[test]
fn test_corrupt_history_loads_empty() {
    let backend = MemoryStore::with_value(HISTORY_KEY, b"\x00\x01 definitely not json");
    let store = FilterHistoryStore::load(Box::new(backend), &HistoryConfig::default());
    assert!(store.is_empty());
}

#[test]
fn test_load_trims_oversized_history() {
    let backend = Arc::new(MemoryStore::new());
    {
        let mut store = FilterHistoryStore::load(Box::new(Arc::clone(&backend)), &HistoryConfig::default())
            .with_clock(Box::new(StepClock::new()));
        for i in 0..10 {
            store.record_usage(f(&format!("name:card{}", i)));
        }
    }
    let smaller = HistoryConfig {
        max_entries: 4,
        recent_limit: 10,
    };
    let store = FilterHistoryStore::load(Box::new(backend), &smaller);
    assert_eq!(store.len(), 4);
    assert_eq!(store.entries()[0].display(), "name:card9");
}

#[test]
fn test_storage_failures_never_reach_caller() {
    let mut store = FilterHistoryStore::load(Box::new(FailingStore), &HistoryConfig::default());
    assert!(store.is_empty());

    store.record_usage(f("set=7ED"));
    assert!(store.pin(&f("set=7ED")));
    assert_eq!(displays(&store.search("7ed")), vec!["set=7ED"]);
    assert!(store.delete(&f("set=7ED")));
}

#[test]
fn test_reads_observe_writes_with_background_persistence() {
    let backend = Arc::new(MemoryStore::new());
    let mut store = FilterHistoryStore::load(
        Box::new(BackgroundStore::new(Arc::clone(&backend))),
        &HistoryConfig::default(),
    );

    store.record_usage(f("set=7ED"));
    assert_eq!(displays(&store.search("7ED")), vec!["set=7ED"]);

    drop(store);
    let bytes = backend.get(HISTORY_KEY).unwrap().unwrap();
    let entries = storage::decode(&bytes).unwrap();
    assert_eq!(entries.len(), 1);
}
