use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::candidate::SuggestionCandidate;
use super::enumeration::enumeration_candidate;
use super::field_match::rank_field_matches;
use crate::config::SuggestionConfig;
use crate::fields::FieldRegistry;
use crate::filter::SearchFilter;
use crate::history::FilterHistoryStore;

/// Ranks filter suggestions for partially typed query text.
///
/// Suggestion lookups never mutate anything; history changes go through the
/// forwarding methods so the engine stays the single owner of its store.
pub struct SuggestionEngine {
    registry: Arc<FieldRegistry>,
    history: FilterHistoryStore,
    max_results: usize,
}

impl fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field("fields", &self.registry.len())
            .field("history", &self.history)
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl SuggestionEngine {
    pub fn new(registry: Arc<FieldRegistry>, history: FilterHistoryStore) -> Self {
        Self {
            registry,
            history,
            max_results: SuggestionConfig::default().max_results,
        }
    }

    pub fn with_config(mut self, config: &SuggestionConfig) -> Self {
        self.max_results = config.max_results;
        self
    }

    /// Ranked suggestions for `input`, skipping history entries in `excluded`.
    ///
    /// Blank input yields only recent history. Otherwise matching history comes
    /// first, followed by field names and then enumeration values.
    pub fn get_suggestions(&self, input: &str, excluded: &[SearchFilter]) -> Vec<SuggestionCandidate> {
        let excluded: HashSet<&SearchFilter> = excluded.iter().collect();
        let term = input.trim();

        if term.is_empty() {
            return self.recent_history(&excluded);
        }

        let mut candidates = self.history_candidates(term, &excluded);
        candidates.extend(
            rank_field_matches(&self.registry, term)
                .into_iter()
                .map(|m| m.into_candidate()),
        );
        candidates.extend(enumeration_candidate(&self.registry, term));

        self.sort_history_first(&mut candidates);
        candidates.truncate(self.max_results);

        log::debug!("{} suggestions for '{}'", candidates.len(), term);
        candidates
    }

    fn recent_history(&self, excluded: &HashSet<&SearchFilter>) -> Vec<SuggestionCandidate> {
        let limit = self.history.recent_limit().min(self.max_results);
        self.history
            .ranked()
            .into_iter()
            .filter(|entry| !excluded.contains(&entry.filter))
            .take(limit)
            .map(|entry| SuggestionCandidate::History {
                filter: entry.filter.clone(),
                is_pinned: entry.is_pinned,
                match_range: None,
            })
            .collect()
    }

    fn history_candidates(
        &self,
        term: &str,
        excluded: &HashSet<&SearchFilter>,
    ) -> Vec<SuggestionCandidate> {
        self.history
            .search(term)
            .into_iter()
            .filter(|m| !excluded.contains(&m.filter))
            .map(|m| SuggestionCandidate::History {
                filter: m.filter,
                is_pinned: m.is_pinned,
                match_range: m.match_range,
            })
            .collect()
    }

    /// Stable sort: history (pinned, then most recent) ahead of everything else,
    /// which keeps its relative order.
    fn sort_history_first(&self, candidates: &mut [SuggestionCandidate]) {
        let last_used: HashMap<&SearchFilter, DateTime<Utc>> = self
            .history
            .entries()
            .iter()
            .map(|entry| (&entry.filter, entry.last_used_at))
            .collect();

        candidates.sort_by(|a, b| match (a, b) {
            (
                SuggestionCandidate::History {
                    filter: filter_a,
                    is_pinned: pinned_a,
                    ..
                },
                SuggestionCandidate::History {
                    filter: filter_b,
                    is_pinned: pinned_b,
                    ..
                },
            ) => pinned_b
                .cmp(pinned_a)
                .then_with(|| last_used.get(filter_b).cmp(&last_used.get(filter_a))),
            (SuggestionCandidate::History { .. }, _) => Ordering::Less,
            (_, SuggestionCandidate::History { .. }) => Ordering::Greater,
            _ => Ordering::Equal,
        });
    }

    pub fn record_usage(&mut self, filter: SearchFilter) {
        self.history.record_usage(filter);
    }

    pub fn pin(&mut self, filter: &SearchFilter) -> bool {
        self.history.pin(filter)
    }

    pub fn unpin(&mut self, filter: &SearchFilter) -> bool {
        self.history.unpin(filter)
    }

    pub fn delete(&mut self, filter: &SearchFilter) -> bool {
        self.history.delete(filter)
    }

    pub fn history(&self) -> &FilterHistoryStore {
        &self.history
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
