//! Configuration store handle
//!
//! The factory owns the active storage backend and caches the persisted
//! snapshot of every document it has read. Reads always hand out an owned
//! copy of that snapshot, so edits that were never saved cannot leak into a
//! later read. [`ConfigFactory::reset`] drops cached snapshots so the next
//! read goes back to storage, which is needed when another handle has written
//! to the same backend.

use std::collections::{BTreeSet, HashMap};

use serde_yaml::Mapping;

use super::ConfigObject;
use crate::error::Result;
use crate::storage::{DEFAULT_COLLECTION, StorageBackend, validate_name};

type CacheKey = (String, String);

/// Explicit handle to active configuration
#[derive(Debug)]
pub struct ConfigFactory {
    storage: Box<dyn StorageBackend>,
    cache: HashMap<CacheKey, Option<Mapping>>,
}

impl ConfigFactory {
    pub fn new(storage: impl StorageBackend + 'static) -> Self {
        Self::from_boxed(Box::new(storage))
    }

    pub fn from_boxed(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            storage,
            cache: HashMap::new(),
        }
    }

    /// Read-only access to the underlying storage
    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Load an object from the default collection
    pub fn get(&mut self, name: &str) -> Result<ConfigObject> {
        self.get_in(DEFAULT_COLLECTION, name)
    }

    /// Load an object from a collection
    ///
    /// A missing object is returned empty with `is_new() == true`.
    pub fn get_in(&mut self, collection: &str, name: &str) -> Result<ConfigObject> {
        let key = (collection.to_string(), name.to_string());
        let snapshot = match self.cache.get(&key) {
            Some(snapshot) => snapshot.clone(),
            None => {
                let snapshot = self.storage.read(collection, name)?;
                self.cache.insert(key, snapshot.clone());
                snapshot
            }
        };

        Ok(match snapshot {
            Some(data) => ConfigObject::loaded(collection, name, data),
            None => ConfigObject::new(collection, name),
        })
    }

    /// Persist an object
    pub fn save(&mut self, config: &mut ConfigObject) -> Result<()> {
        validate_name(config.name())?;
        self.write(config.collection(), config.name(), config.get_all())?;
        config.mark_saved();
        tracing::debug!(
            collection = config.collection(),
            name = config.name(),
            "Saved configuration"
        );
        Ok(())
    }

    /// Delete an object from storage
    pub fn delete(&mut self, config: &mut ConfigObject) -> Result<()> {
        self.delete_name(config.collection(), config.name())?;
        config.mark_deleted();
        Ok(())
    }

    /// Write a document directly, keeping the cache coherent
    pub fn write(&mut self, collection: &str, name: &str, data: &Mapping) -> Result<()> {
        self.storage.write(collection, name, data)?;
        self.cache.insert(
            (collection.to_string(), name.to_string()),
            Some(data.clone()),
        );
        Ok(())
    }

    /// Delete a document by name, returning whether it existed
    pub fn delete_name(&mut self, collection: &str, name: &str) -> Result<bool> {
        let existed = self.storage.delete(collection, name)?;
        self.cache
            .insert((collection.to_string(), name.to_string()), None);
        tracing::debug!(collection, name, existed, "Deleted configuration");
        Ok(existed)
    }

    pub fn list_names(&self, collection: &str) -> Result<BTreeSet<String>> {
        self.storage.list_names(collection)
    }

    /// Forget the cached snapshots of `name` in every collection
    pub fn reset(&mut self, name: &str) {
        self.cache.retain(|(_, cached), _| cached != name);
    }

    /// Forget every cached snapshot
    pub fn reset_all(&mut self) {
        self.cache.clear();
    }
}
