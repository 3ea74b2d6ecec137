//! Collection resolution
//!
//! Lists every collection an install has to consider: the default collection
//! first, then each override collection in lexicographic order. Override
//! collections are known either because storage already holds documents in
//! them or because a locale is active on the site (`language.<langcode>`).

use std::collections::BTreeSet;

use crate::error::Result;
use crate::storage::{DEFAULT_COLLECTION, StorageBackend, validate_collection};

/// Prefix of per-language override collections
pub const LANGUAGE_COLLECTION_PREFIX: &str = "language.";

/// Collection holding overrides for one language
pub fn language_collection(langcode: &str) -> String {
    format!("{LANGUAGE_COLLECTION_PREFIX}{langcode}")
}

/// Resolves the ordered set of collections known to a site
#[derive(Debug, Clone, Default)]
pub struct CollectionResolver {
    locales: Vec<String>,
}

impl CollectionResolver {
    pub fn new(locales: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
        }
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Default collection followed by every known override collection
    pub fn list_collections(&self, storage: &dyn StorageBackend) -> Result<Vec<String>> {
        self.list_collections_with(storage, std::iter::empty::<String>())
    }

    /// Like [`list_collections`](Self::list_collections), also merging
    /// collections that are about to be introduced
    pub fn list_collections_with(
        &self,
        storage: &dyn StorageBackend,
        introduced: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Vec<String>> {
        let mut overrides: BTreeSet<String> = storage.collections()?;
        overrides.extend(self.locales.iter().map(|l| language_collection(l)));
        overrides.extend(introduced.into_iter().map(Into::into));
        overrides.remove(DEFAULT_COLLECTION);

        for collection in &overrides {
            validate_collection(collection)?;
        }

        let mut collections = Vec::with_capacity(overrides.len() + 1);
        collections.push(DEFAULT_COLLECTION.to_string());
        collections.extend(overrides);
        Ok(collections)
    }
}
