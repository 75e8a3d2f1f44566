// Configuration type definitions

use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_MAX_HISTORY_ENTRIES: usize = 1000;
pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 10;

fn default_max_entries() -> usize {
    DEFAULT_MAX_HISTORY_ENTRIES
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

fn default_max_results() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

/// Filter history configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// Entries beyond this count are dropped from the oldest end
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// How many entries an empty search returns
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            max_entries: DEFAULT_MAX_HISTORY_ENTRIES,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// Suggestion list configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuggestionConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            max_results: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// Persistence configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory for persisted state; the config directory when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Write history from a background thread instead of the caller's
    #[serde(default)]
    pub background_writes: bool,
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history.max_entries, 1000);
        assert_eq!(config.history.recent_limit, 10);
        assert_eq!(config.suggestions.max_results, 10);
        assert_eq!(config.storage.data_dir, None);
        assert!(!config.storage.background_writes);
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
[history]
max_entries = 50
recent_limit = 5

[suggestions]
max_results = 7

[storage]
data_dir = "/tmp/manasift"
background_writes = true
"#,
        )
        .unwrap();

        assert_eq!(config.history.max_entries, 50);
        assert_eq!(config.history.recent_limit, 5);
        assert_eq!(config.suggestions.max_results, 7);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/manasift")));
        assert!(config.storage.background_writes);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[history]\nmax_entries = \"lots\"\n");
        assert!(result.is_err());
    }

    // Any subset of the history section parses, and missing fields fall back to defaults
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_missing_fields_use_defaults(
            max_entries in prop::option::of(1usize..5000),
            recent_limit in prop::option::of(1usize..50),
        ) {
            let mut toml_content = String::from("[history]\n");
            if let Some(max) = max_entries {
                toml_content.push_str(&format!("max_entries = {}\n", max));
            }
            if let Some(limit) = recent_limit {
                toml_content.push_str(&format!("recent_limit = {}\n", limit));
            }

            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse: {}", toml_content);

            let config = config.unwrap();
            prop_assert_eq!(config.history.max_entries, max_entries.unwrap_or(DEFAULT_MAX_HISTORY_ENTRIES));
            prop_assert_eq!(config.history.recent_limit, recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT));
            prop_assert_eq!(config.suggestions.max_results, DEFAULT_MAX_SUGGESTIONS);
        }
    }
}
