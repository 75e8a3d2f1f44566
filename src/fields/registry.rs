use std::collections::HashMap;

use super::catalog;
use super::types::FieldConfig;
use crate::error::{Result, SuggestError};

/// Immutable lookup table from field keys and aliases to [`FieldConfig`]s
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldConfig>,
    canonical: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl FieldRegistry {
    /// Registry of the built-in card search fields.
    pub fn standard() -> Self {
        let (registry, duplicates) = Self::index(catalog::standard_fields());
        for key in duplicates {
            log::warn!("Ignoring duplicate built-in field key '{}'", key);
        }
        registry
    }

    pub fn builder() -> FieldRegistryBuilder {
        FieldRegistryBuilder::default()
    }

    /// Index `fields`, keeping the first owner of any key that appears twice.
    ///
    /// Returns the registry and the keys that were dropped as duplicates.
    fn index(fields: Vec<FieldConfig>) -> (Self, Vec<String>) {
        let mut canonical = HashMap::new();
        let mut aliases = HashMap::new();
        let mut duplicates = Vec::new();

        for (idx, field) in fields.iter().enumerate() {
            let key = &field.canonical_key;
            if canonical.contains_key(key) || aliases.contains_key(key) {
                duplicates.push(key.clone());
            } else {
                canonical.insert(key.clone(), idx);
            }
        }

        for (idx, field) in fields.iter().enumerate() {
            for alias in &field.aliases {
                if canonical.contains_key(alias) || aliases.contains_key(alias) {
                    duplicates.push(alias.clone());
                } else {
                    aliases.insert(alias.clone(), idx);
                }
            }
        }

        let registry = Self {
            fields,
            canonical,
            aliases,
        };
        (registry, duplicates)
    }

    /// Resolve `key` case-insensitively, canonical keys before aliases.
    pub fn lookup(&self, key: &str) -> Option<&FieldConfig> {
        let key = key.to_lowercase();
        self.canonical
            .get(&key)
            .or_else(|| self.aliases.get(&key))
            .map(|&idx| &self.fields[idx])
    }

    /// Canonical key for `key`, or the lowercased input when it is unknown.
    pub fn canonicalize(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(field) => field.canonical_key.clone(),
            None => key.to_lowercase(),
        }
    }

    /// All configurations in table order.
    pub fn fields(&self) -> &[FieldConfig] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builds a custom [`FieldRegistry`], rejecting keys claimed by two fields
#[derive(Debug, Default)]
pub struct FieldRegistryBuilder {
    fields: Vec<FieldConfig>,
}

impl FieldRegistryBuilder {
    pub fn field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields<I: IntoIterator<Item = FieldConfig>>(mut self, fields: I) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Start from the built-in table.
    pub fn with_standard_fields(self) -> Self {
        self.fields(catalog::standard_fields())
    }

    pub fn build(self) -> Result<FieldRegistry> {
        let (registry, duplicates) = FieldRegistry::index(self.fields);
        match duplicates.into_iter().next() {
            Some(key) => Err(SuggestError::DuplicateFieldKey(key)),
            None => Ok(registry),
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
