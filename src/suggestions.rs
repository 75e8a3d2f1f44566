mod candidate;
mod engine;
mod enumeration;
mod field_match;

pub use candidate::{EnumerationOption, SuggestionCandidate};
pub use engine::SuggestionEngine;
