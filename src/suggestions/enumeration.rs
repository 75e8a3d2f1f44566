use super::candidate::{EnumerationOption, SuggestionCandidate};
use crate::fields::FieldRegistry;
use crate::filter::ComparisonOperator;
use crate::matching::find_match;

/// Operators that open a value list, in the order they are looked for
const VALUE_OPERATORS: [ComparisonOperator; 3] = [
    ComparisonOperator::NotEqual,
    ComparisonOperator::Including,
    ComparisonOperator::Equal,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OperatorSplit<'a> {
    pub key: &'a str,
    pub operator: ComparisonOperator,
    pub fragment: &'a str,
}

/// Split at the first occurrence of the highest-priority operator present.
pub(crate) fn split_on_operator(term: &str) -> Option<OperatorSplit<'_>> {
    VALUE_OPERATORS.iter().find_map(|&operator| {
        term.find(operator.symbol()).map(|pos| OperatorSplit {
            key: term[..pos].trim(),
            operator,
            fragment: term[pos + operator.symbol().len()..].trim(),
        })
    })
}

/// Value suggestions for `key<op>fragment` when `key` is an enumeration field.
///
/// Options are ordered by length; with a fragment, only options containing it are
/// kept, which may leave the list empty.
pub(crate) fn enumeration_candidate(registry: &FieldRegistry, term: &str) -> Option<SuggestionCandidate> {
    let split = split_on_operator(term)?;
    let field = registry.lookup(split.key)?;
    let options = field.value_kind.options()?;

    let mut matched: Vec<EnumerationOption> = if split.fragment.is_empty() {
        options
            .iter()
            .map(|value| EnumerationOption {
                value: value.clone(),
                match_range: None,
            })
            .collect()
    } else {
        options
            .iter()
            .filter_map(|value| {
                find_match(value, split.fragment).map(|range| EnumerationOption {
                    value: value.clone(),
                    match_range: Some(range),
                })
            })
            .collect()
    };

    matched.sort_by_key(|option| option.value.chars().count());

    Some(SuggestionCandidate::Enumeration {
        filter_type: field.canonical_key.clone(),
        operator: split.operator,
        options: matched,
    })
}

#[cfg(test)]
#[path = "enumeration_tests.rs"]
mod enumeration_tests;
