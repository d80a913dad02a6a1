//! Canonical registry of the input fields a topic can ask a traveler for.
//!
//! Every topic references inputs by catalog key, so a given key resolves to
//! the same dotted contract path everywhere it is used.

mod entries;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Smallest catalog that can still fill a refusal-recovery form on its own.
pub const MIN_CATALOG_ENTRIES: usize = 3;

pub use entries::{
    BUDGET_BAND, COMFORT_LEVEL, CROWD_TOLERANCE, DATES_FLEXIBILITY, DATES_MONTH, DATES_YEAR,
    FIRST_SAFARI, PARTY_ADULTS, PARTY_CHILDREN_AGES, RISK_TOLERANCE, TRIP_LENGTH_DAYS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    String,
    Number,
    Boolean,
    Enum,
    Array,
}

/// Fully typed catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogInput {
    pub key: String,
    pub label: String,
    pub description: String,
    pub example: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

/// Catalog entry with type metadata stripped, as carried by topic records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeInput {
    pub key: String,
    pub label: String,
    pub description: String,
    pub example: String,
}

/// Shallow per-topic overrides. The key itself can never be overridden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl InputOverrides {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.description.is_none() && self.example.is_none()
    }
}

impl CatalogInput {
    pub fn to_runtime_input(&self, overrides: Option<&InputOverrides>) -> RuntimeInput {
        let overrides = overrides.cloned().unwrap_or_default();
        RuntimeInput {
            key: self.key.clone(),
            label: overrides.label.unwrap_or_else(|| self.label.clone()),
            description: overrides
                .description
                .unwrap_or_else(|| self.description.clone()),
            example: overrides.example.unwrap_or_else(|| self.example.clone()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog key '{0}' is declared more than once")]
    DuplicateKey(String),
    #[error("catalog entry with label '{0}' has an empty key")]
    EmptyKey(String),
    #[error("catalog has {count} entries; at least {min} are needed")]
    TooFewEntries { count: usize, min: usize },
}

/// Immutable lookup table of catalog inputs, keyed by dotted path.
#[derive(Debug, Clone)]
pub struct InputCatalog {
    entries: BTreeMap<String, CatalogInput>,
}

impl InputCatalog {
    /// Builds the catalog shipped with the product.
    pub fn standard() -> Self {
        let entries = entries::standard_entries()
            .into_iter()
            .map(|entry| (entry.key.clone(), entry))
            .collect();
        Self { entries }
    }

    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = CatalogInput>,
    {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.key.trim().is_empty() {
                return Err(CatalogError::EmptyKey(entry.label));
            }
            if map.contains_key(&entry.key) {
                return Err(CatalogError::DuplicateKey(entry.key));
            }
            map.insert(entry.key.clone(), entry);
        }
        if map.len() < MIN_CATALOG_ENTRIES {
            return Err(CatalogError::TooFewEntries {
                count: map.len(),
                min: MIN_CATALOG_ENTRIES,
            });
        }
        Ok(Self { entries: map })
    }

    pub fn resolve(&self, key: &str) -> Option<&CatalogInput> {
        self.entries.get(key)
    }

    /// Resolves `key` and strips it down to a runtime input.
    pub fn runtime_input(
        &self,
        key: &str,
        overrides: Option<&InputOverrides>,
    ) -> Option<RuntimeInput> {
        self.resolve(key)
            .map(|entry| entry.to_runtime_input(overrides))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogInput> {
        self.entries.values()
    }
}
