//! Single-clause structured search filters.
//!
//! A [`SearchFilter`] is one `[-]key<op>value` clause of a card search query. The
//! suggestion engine treats it as an opaque value: it only needs equality, hashing
//! and the canonical query string produced by `Display`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SuggestError};

/// How a filter compares its field against the value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Including,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonOperator {
    /// Longest symbols first so `>=` wins over `>` at the same position.
    const PARSE_ORDER: [ComparisonOperator; 7] = [
        ComparisonOperator::NotEqual,
        ComparisonOperator::LessThanOrEqual,
        ComparisonOperator::GreaterThanOrEqual,
        ComparisonOperator::Including,
        ComparisonOperator::Equal,
        ComparisonOperator::LessThan,
        ComparisonOperator::GreaterThan,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Including => ":",
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::PARSE_ORDER
            .into_iter()
            .find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchFilter {
    pub key: String,
    pub operator: ComparisonOperator,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negated: bool,
}

impl SearchFilter {
    pub fn new(key: impl Into<String>, operator: ComparisonOperator, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator,
            value: value.into(),
            negated: false,
        }
    }

    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    /// Canonical query string, identical to the `Display` output.
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("-")?;
        }
        write!(f, "{}{}", self.key, self.operator)?;
        if self.value.chars().any(char::is_whitespace) {
            write!(f, "\"{}\"", self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

impl FromStr for SearchFilter {
    type Err = SuggestError;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let (negated, clause) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (pos, operator) = find_operator(clause)
            .ok_or_else(|| SuggestError::InvalidFilter(format!("no operator in '{}'", trimmed)))?;

        let key = clause[..pos].trim();
        if key.is_empty() {
            return Err(SuggestError::InvalidFilter(format!(
                "missing field key in '{}'",
                trimmed
            )));
        }

        let raw_value = clause[pos + operator.symbol().len()..].trim();
        let value = raw_value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(raw_value);

        Ok(SearchFilter {
            key: key.to_string(),
            operator,
            value: value.to_string(),
            negated,
        })
    }
}

/// Earliest operator in `clause`; the longest symbol wins at equal positions.
fn find_operator(clause: &str) -> Option<(usize, ComparisonOperator)> {
    ComparisonOperator::PARSE_ORDER
        .into_iter()
        .filter_map(|op| clause.find(op.symbol()).map(|pos| (pos, op)))
        .min_by_key(|(pos, op)| (*pos, std::cmp::Reverse(op.symbol().len())))
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod filter_tests;
