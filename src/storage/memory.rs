//! In-memory storage

use std::collections::{BTreeMap, BTreeSet};

use serde_yaml::Mapping;

use super::{DEFAULT_COLLECTION, StorageBackend, validate_collection, validate_name};
use crate::error::Result;

/// Storage keeping every collection in ordered maps
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    collections: BTreeMap<String, BTreeMap<String, Mapping>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents across all collections
    pub fn len(&self) -> usize {
        self.collections.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, collection: &str, name: &str) -> Result<Option<Mapping>> {
        validate_name(name)?;
        Ok(self
            .collections
            .get(collection)
            .and_then(|documents| documents.get(name))
            .cloned())
    }

    fn write(&mut self, collection: &str, name: &str, data: &Mapping) -> Result<()> {
        validate_collection(collection)?;
        validate_name(name)?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(name.to_string(), data.clone());
        Ok(())
    }

    fn delete(&mut self, collection: &str, name: &str) -> Result<bool> {
        validate_name(name)?;
        let Some(documents) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        let existed = documents.remove(name).is_some();
        if documents.is_empty() {
            self.collections.remove(collection);
        }
        Ok(existed)
    }

    fn list_names(&self, collection: &str) -> Result<BTreeSet<String>> {
        Ok(self
            .collections
            .get(collection)
            .map(|documents| documents.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn collections(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .collections
            .keys()
            .filter(|c| c.as_str() != DEFAULT_COLLECTION)
            .cloned()
            .collect())
    }

    fn exists(&self, collection: &str, name: &str) -> Result<bool> {
        Ok(self
            .collections
            .get(collection)
            .is_some_and(|documents| documents.contains_key(name)))
    }
}
