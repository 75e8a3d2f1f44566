use std::fmt;

use crate::filter::{ComparisonOperator, SearchFilter};
use crate::matching::MatchRange;

/// One allowed value of an enumeration field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationOption {
    pub value: String,
    /// Span of `value` matching the typed fragment
    pub match_range: Option<MatchRange>,
}

/// A ranked suggestion shown while a filter is being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionCandidate {
    /// A previously used filter
    History {
        filter: SearchFilter,
        is_pinned: bool,
        /// Span of the filter's display string
        match_range: Option<MatchRange>,
    },
    /// A filter field whose key or alias matches the input
    FilterType {
        /// Canonical key of the field
        filter_type: String,
        /// The canonical key or alias that matched
        matched_key: String,
        is_exact: bool,
        /// Span of `matched_key`
        match_range: Option<MatchRange>,
    },
    /// Values for an enumeration field once an operator has been typed
    Enumeration {
        filter_type: String,
        operator: ComparisonOperator,
        options: Vec<EnumerationOption>,
    },
}

impl SuggestionCandidate {
    pub fn is_history(&self) -> bool {
        matches!(self, SuggestionCandidate::History { .. })
    }

    /// Text shown for the candidate; enumerations render as `key<op>`.
    pub fn label(&self) -> String {
        match self {
            SuggestionCandidate::History { filter, .. } => filter.to_string(),
            SuggestionCandidate::FilterType { filter_type, .. } => filter_type.clone(),
            SuggestionCandidate::Enumeration {
                filter_type,
                operator,
                ..
            } => format!("{}{}", filter_type, operator),
        }
    }
}

impl fmt::Display for SuggestionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionCandidate::History {
                filter, is_pinned, ..
            } => {
                let marker = if *is_pinned { " (pinned)" } else { "" };
                write!(f, "history: {}{}", filter, marker)
            }
            SuggestionCandidate::FilterType {
                filter_type,
                matched_key,
                is_exact,
                ..
            } => {
                write!(f, "field: {}", filter_type)?;
                if matched_key != filter_type {
                    write!(f, " (via {})", matched_key)?;
                }
                if *is_exact {
                    write!(f, " [exact]")?;
                }
                Ok(())
            }
            SuggestionCandidate::Enumeration {
                filter_type,
                operator,
                options,
            } => {
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                write!(f, "values: {}{} {}", filter_type, operator, values.join(", "))
            }
        }
    }
}
