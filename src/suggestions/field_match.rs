use std::cmp::Ordering;

use super::candidate::SuggestionCandidate;
use crate::fields::{FieldConfig, FieldRegistry};
use crate::matching::{MatchRange, eq_ignore_case, find_match};

/// The key of one field chosen to represent it for a typed term
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldMatch<'a> {
    pub field: &'a FieldConfig,
    pub matched_key: &'a str,
    pub is_exact: bool,
    pub is_canonical: bool,
    pub range: MatchRange,
}

impl FieldMatch<'_> {
    fn match_len(&self) -> usize {
        self.range.len()
    }

    fn key_len(&self) -> usize {
        self.matched_key.chars().count()
    }

    pub fn into_candidate(self) -> SuggestionCandidate {
        SuggestionCandidate::FilterType {
            filter_type: self.field.canonical_key.clone(),
            matched_key: self.matched_key.to_string(),
            is_exact: self.is_exact,
            match_range: Some(self.range),
        }
    }
}

/// Exact first, then longer match, canonical key over alias, shorter key.
fn preference(a: &FieldMatch<'_>, b: &FieldMatch<'_>) -> Ordering {
    b.is_exact
        .cmp(&a.is_exact)
        .then_with(|| b.match_len().cmp(&a.match_len()))
        .then_with(|| b.is_canonical.cmp(&a.is_canonical))
        .then_with(|| a.key_len().cmp(&b.key_len()))
}

/// Pick the key of `field` that best matches `term`, if any does.
pub(crate) fn best_key_match<'a>(field: &'a FieldConfig, term: &str) -> Option<FieldMatch<'a>> {
    let keys = || {
        field
            .candidate_keys()
            .enumerate()
            .map(|(idx, key)| (idx == 0, key))
    };

    if let Some((is_canonical, key)) = keys().find(|(_, key)| eq_ignore_case(key, term)) {
        return Some(FieldMatch {
            field,
            matched_key: key,
            is_exact: true,
            is_canonical,
            range: MatchRange::full(key),
        });
    }

    keys()
        .filter_map(|(is_canonical, key)| {
            find_match(key, term).map(|range| FieldMatch {
                field,
                matched_key: key,
                is_exact: false,
                is_canonical,
                range,
            })
        })
        .min_by(preference)
}

/// At most one match per field, best first; ties keep registry order.
pub(crate) fn rank_field_matches<'a>(registry: &'a FieldRegistry, term: &str) -> Vec<FieldMatch<'a>> {
    let mut matches: Vec<FieldMatch<'a>> = registry
        .fields()
        .iter()
        .filter_map(|field| best_key_match(field, term))
        .collect();
    matches.sort_by(preference);
    matches
}

#[cfg(test)]
#[path = "field_match_tests.rs"]
mod field_match_tests;
