use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::SearchFilter;
use crate::matching::MatchRange;

/// A previously applied filter. Identity is the filter itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub filter: SearchFilter,
    pub last_used_at: DateTime<Utc>,
    #[serde(default)]
    pub is_pinned: bool,
}

impl HistoryEntry {
    pub fn new(filter: SearchFilter, last_used_at: DateTime<Utc>) -> Self {
        Self {
            filter,
            last_used_at,
            is_pinned: false,
        }
    }

    pub fn display(&self) -> String {
        self.filter.to_string()
    }
}

/// Pinned entries first, then most recently used.
pub(crate) fn rank_order(a: &HistoryEntry, b: &HistoryEntry) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.last_used_at.cmp(&a.last_used_at))
}

/// One history search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMatch {
    pub filter: SearchFilter,
    pub display: String,
    pub is_pinned: bool,
    pub last_used_at: DateTime<Utc>,
    /// Span of `display` that matched the search term
    pub match_range: Option<MatchRange>,
}

impl HistoryMatch {
    pub(crate) fn new(entry: &HistoryEntry, display: String, match_range: Option<MatchRange>) -> Self {
        Self {
            filter: entry.filter.clone(),
            display,
            is_pinned: entry.is_pinned,
            last_used_at: entry.last_used_at,
            match_range,
        }
    }

    pub(crate) fn unhighlighted(entry: &HistoryEntry) -> Self {
        Self::new(entry, entry.display(), None)
    }
}
