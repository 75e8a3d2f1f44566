use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::clock::{Clock, SystemClock};
use super::entry::{self, HistoryEntry, HistoryMatch};
use super::storage::{self, HISTORY_KEY, KeyValueStore, MemoryStore};
use crate::config::HistoryConfig;
use crate::filter::SearchFilter;
use crate::matching::find_match;

/// Persisted, recency-ordered list of applied filters.
///
/// `entries` is kept most-recent-first. Every mutation re-saves the whole list;
/// persistence failures are logged and never reach the caller, so the in-memory
/// list is always the source of truth for reads.
pub struct FilterHistoryStore {
    entries: Vec<HistoryEntry>,
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    max_entries: usize,
    recent_limit: usize,
}

impl fmt::Debug for FilterHistoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterHistoryStore")
            .field("entries", &self.entries.len())
            .field("max_entries", &self.max_entries)
            .finish_non_exhaustive()
    }
}

impl FilterHistoryStore {
    /// Load history from `storage`, starting empty if nothing usable is stored.
    pub fn load(storage: Box<dyn KeyValueStore>, config: &HistoryConfig) -> Self {
        let entries = match storage.get(HISTORY_KEY) {
            Ok(Some(bytes)) => match storage::decode(&bytes) {
                Ok(entries) => {
                    storage::trim_to_max(storage::deduplicate(entries), config.max_entries)
                }
                Err(e) => {
                    log::warn!("Discarding unreadable filter history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read filter history: {}", e);
                Vec::new()
            }
        };

        log::debug!("Loaded {} filter history entries", entries.len());

        Self {
            entries,
            storage,
            clock: Box::new(SystemClock),
            max_entries: config.max_entries,
            recent_limit: config.recent_limit,
        }
    }

    /// Empty history that is never written anywhere durable.
    pub fn in_memory(config: &HistoryConfig) -> Self {
        Self::load(Box::new(MemoryStore::new()), config)
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Move `filter` to the head with a fresh timestamp, keeping its pin.
    pub fn record_usage(&mut self, filter: SearchFilter) {
        let last_used_at = self.next_timestamp();
        let was_pinned = match self.position(&filter) {
            Some(idx) => self.entries.remove(idx).is_pinned,
            None => false,
        };

        let entry = HistoryEntry {
            filter,
            last_used_at,
            is_pinned: was_pinned,
        };
        log::debug!("Recording filter usage: {}", entry.display());
        self.entries.insert(0, entry);

        if self.entries.len() > self.max_entries {
            self.entries.truncate(self.max_entries);
        }
        self.persist();
    }

    /// Entries whose display contains `term`, pinned first then most recent.
    ///
    /// A blank term returns the most recent entries without highlights.
    pub fn search(&self, term: &str) -> Vec<HistoryMatch> {
        let term = term.trim();
        if term.is_empty() {
            return self
                .ranked()
                .into_iter()
                .take(self.recent_limit)
                .map(HistoryMatch::unhighlighted)
                .collect();
        }

        let mut matches: Vec<HistoryMatch> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let display = entry.display();
                find_match(&display, term).map(|range| HistoryMatch::new(entry, display, Some(range)))
            })
            .collect();

        matches.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| b.last_used_at.cmp(&a.last_used_at))
        });
        matches
    }

    /// Returns whether a matching entry exists.
    pub fn pin(&mut self, filter: &SearchFilter) -> bool {
        self.set_pinned(filter, true)
    }

    /// Returns whether a matching entry exists.
    pub fn unpin(&mut self, filter: &SearchFilter) -> bool {
        self.set_pinned(filter, false)
    }

    /// Returns whether an entry was removed.
    pub fn delete(&mut self, filter: &SearchFilter) -> bool {
        let Some(idx) = self.position(filter) else {
            return false;
        };
        self.entries.remove(idx);
        self.persist();
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    pub fn get(&self, filter: &SearchFilter) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| &entry.filter == filter)
    }

    pub fn is_pinned(&self, filter: &SearchFilter) -> bool {
        self.get(filter).is_some_and(|entry| entry.is_pinned)
    }

    /// Entries in usage order, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries pinned first, then by descending last use.
    pub fn ranked(&self) -> Vec<&HistoryEntry> {
        let mut ranked: Vec<&HistoryEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| entry::rank_order(a, b));
        ranked
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, filter: &SearchFilter) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.filter == filter)
    }

    fn set_pinned(&mut self, filter: &SearchFilter, pinned: bool) -> bool {
        let Some(idx) = self.position(filter) else {
            return false;
        };
        self.entries[idx].is_pinned = pinned;
        self.persist();
        true
    }

    /// Current time, nudged past the newest entry when the clock has not advanced.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        match self.entries.iter().map(|entry| entry.last_used_at).max() {
            Some(newest) if now <= newest => newest + Duration::microseconds(1),
            _ => now,
        }
    }

    fn persist(&self) {
        let bytes = match storage::encode(&self.entries) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to encode filter history: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(HISTORY_KEY, &bytes) {
            log::warn!("Failed to save filter history: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
