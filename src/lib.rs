//! Filter suggestions and ranked search history for card search clients.
//!
//! The [`SuggestionEngine`] turns partially typed query text into a ranked list of
//! [`SuggestionCandidate`]s drawn from three sources: previously used filters in the
//! [`FilterHistoryStore`], filter field names from the [`FieldRegistry`], and the
//! allowed values of enumeration fields.

pub mod config;
pub mod error;
pub mod fields;
pub mod filter;
pub mod history;
pub mod matching;
pub mod suggestions;

pub use error::{Result, SuggestError};
pub use fields::{FieldConfig, FieldRegistry, FieldRegistryBuilder, ValueKind};
pub use filter::{ComparisonOperator, SearchFilter};
pub use history::{FilterHistoryStore, HistoryEntry, HistoryMatch};
pub use matching::MatchRange;
pub use suggestions::{EnumerationOption, SuggestionCandidate, SuggestionEngine};
