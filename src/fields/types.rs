use std::fmt;

/// Kind of value a filter field accepts
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// Free text
    Text,
    Numeric { min: f64, max: f64, step: f64 },
    /// Fixed option list, in display order
    Enumeration { options: Vec<String> },
}

impl ValueKind {
    pub fn enumeration<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValueKind::Enumeration {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            ValueKind::Enumeration { options } => Some(options),
            ValueKind::Text | ValueKind::Numeric { .. } => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Text => write!(f, "text"),
            ValueKind::Numeric { min, max, step } => write!(f, "number {}..{} step {}", min, max, step),
            ValueKind::Enumeration { options } => write!(f, "one of {} options", options.len()),
        }
    }
}

/// Metadata for one filterable card field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub canonical_key: String,
    pub display_name: String,
    pub value_kind: ValueKind,
    pub aliases: Vec<String>,
}

impl FieldConfig {
    pub fn new(canonical_key: &str, display_name: &str, value_kind: ValueKind) -> Self {
        Self {
            canonical_key: canonical_key.to_lowercase(),
            display_name: display_name.to_string(),
            value_kind,
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_lowercase()).collect();
        self
    }

    /// Canonical key followed by every alias, in declaration order.
    pub fn candidate_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_key.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn is_enumeration(&self) -> bool {
        matches!(self.value_kind, ValueKind::Enumeration { .. })
    }
}
