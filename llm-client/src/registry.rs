//! Named table of Bedrock model identifiers
//!
//! Entries keep insertion order, which is the order models are called in.

use serde::{Deserialize, Serialize};

/// A human-readable model name and its Bedrock model identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub id: String,
}

/// Ordered name -> model identifier mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelRegistry {
    entries: Vec<ModelEntry>,
}

const DEFAULT_MODELS: &[(&str, &str)] = &[
    ("Amazon Nova Micro", "us.amazon.nova-micro-v1:0"),
    (
        "Llama 4 Maverick 17B Instruct",
        "us.meta.llama4-maverick-17b-instruct-v1:0",
    ),
];

const CATALOG: &[(&str, &str)] = &[
    (
        "Claude 3.7 Sonnet",
        "us.anthropic.claude-3-7-sonnet-20250219-v1:0",
    ),
    (
        "Claude 3.5 Sonnet",
        "us.anthropic.claude-3-5-sonnet-20240620-v1:0",
    ),
    (
        "Claude 3.5 Haiku",
        "us.anthropic.claude-3-5-haiku-20241022-v1:0",
    ),
    (
        "Claude 4.5 Sonnet",
        "us.anthropic.claude-sonnet-4-5-20250929-v1:0",
    ),
    ("Amazon Nova Pro", "us.amazon.nova-pro-v1:0"),
    ("Amazon Nova Micro", "us.amazon.nova-micro-v1:0"),
    ("DeepSeek-R1", "us.deepseek.r1-v1:0"),
    (
        "Meta Llama 3.1 70B Instruct",
        "us.meta.llama3-1-70b-instruct-v1:0",
    ),
    (
        "Llama 4 Maverick 17B Instruct",
        "us.meta.llama4-maverick-17b-instruct-v1:0",
    ),
];

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The models compared by a plain run
    pub fn defaults() -> Self {
        DEFAULT_MODELS.iter().copied().collect()
    }

    /// Every model the demo knows about
    pub fn catalog() -> Self {
        CATALOG.iter().copied().collect()
    }

    /// Add a model, or replace the identifier of an existing name in place
    pub fn insert(&mut self, name: impl Into<String>, id: impl Into<String>) {
        let name = name.into();
        let id = id.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.id = id,
            None => self.entries.push(ModelEntry { name, id }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.id.as_str())
    }

    pub fn first(&self) -> Option<&ModelEntry> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, I: Into<String>> FromIterator<(N, I)> for ModelRegistry {
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut registry = Self::new();
        for (name, id) in iter {
            registry.insert(name, id);
        }
        registry
    }
}

impl From<Vec<ModelEntry>> for ModelRegistry {
    fn from(entries: Vec<ModelEntry>) -> Self {
        entries.into_iter().map(|e| (e.name, e.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_order() {
        let registry = ModelRegistry::defaults();
        let names: Vec<&str> = registry.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Amazon Nova Micro", "Llama 4 Maverick 17B Instruct"]
        );
        assert_eq!(
            registry.first().unwrap().id,
            "us.amazon.nova-micro-v1:0"
        );
    }

    #[test]
    fn test_catalog_contains_defaults() {
        let catalog = ModelRegistry::catalog();
        for entry in ModelRegistry::defaults().iter() {
            assert_eq!(catalog.get(&entry.name), Some(entry.id.as_str()));
        }
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut registry: ModelRegistry = [("A", "id1"), ("B", "id2")].into_iter().collect();
        registry.insert("A", "id3");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.first().unwrap().name, "A");
        assert_eq!(registry.get("A"), Some("id3"));
        assert_eq!(registry.get("missing"), None);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ModelRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.first().is_none());
    }
}
