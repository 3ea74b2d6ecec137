//! Bundled default configuration scanning
//!
//! Reads the documents an extension ships under `config/install/`. The
//! directory root holds the default collection; sub-directories hold override
//! collections using the same layout as [`FileStorage`].

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde_yaml::Mapping;

use super::conflict::Candidates;
use crate::error::{Result, scan_failed};
use crate::extension::Extension;
use crate::storage::file::{decode_document, list_documents};
use crate::storage::{DEFAULT_COLLECTION, FileStorage, StorageBackend, validate_name};

/// Defaults scanned for one extension, keyed by collection then name
#[derive(Debug, Clone, Default)]
pub struct ScannedDefaults {
    pub extension: String,
    pub documents: BTreeMap<String, BTreeMap<String, Mapping>>,
}

impl ScannedDefaults {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            documents: BTreeMap::new(),
        }
    }

    /// Names shipped for the default collection
    pub fn default_names(&self) -> BTreeSet<String> {
        self.names_in(DEFAULT_COLLECTION)
    }

    /// Names shipped for one collection
    pub fn names_in(&self, collection: &str) -> BTreeSet<String> {
        self.documents
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Names that must not already exist for this extension to install
    ///
    /// For the default collection these are the shipped names. For an
    /// override collection they are the names shipped for it plus every
    /// default-collection name, because an override left behind for a name
    /// about to be created is stale data.
    pub fn candidates(&self, collections: &[String]) -> Candidates {
        let defaults = self.default_names();
        let mut candidates = Candidates::new();

        for collection in collections {
            let mut names = self.names_in(collection);
            if collection != DEFAULT_COLLECTION {
                names.extend(defaults.iter().cloned());
            }
            if !names.is_empty() {
                candidates.insert(collection.clone(), names);
            }
        }

        candidates
    }

    /// Total number of scanned documents
    pub fn len(&self) -> usize {
        self.documents.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads extensions' bundled defaults
#[derive(Debug, Clone, Default)]
pub struct DefaultConfigScanner {
    profile: Option<Extension>,
}

impl DefaultConfigScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let the install profile's defaults replace same-named defaults of
    /// other extensions
    #[must_use]
    pub fn with_profile(mut self, profile: Extension) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn profile(&self) -> Option<&Extension> {
        self.profile.as_ref()
    }

    /// Every default shipped by `extension` for `collection`
    ///
    /// A collection the extension ships nothing for yields an empty map. A
    /// document that is not a well-formed YAML mapping fails the scan.
    pub fn scan_defaults(
        &self,
        extension: &Extension,
        collection: &str,
    ) -> Result<BTreeMap<String, Mapping>> {
        let storage = FileStorage::new(extension.config_install_dir());
        let dir = storage.collection_dir(collection);
        let names = list_documents(&dir).map_err(|e| {
            scan_failed(
                &extension.name,
                collection,
                dir.display().to_string(),
                e.to_string(),
            )
        })?;

        let profile_storage = self
            .profile
            .as_ref()
            .filter(|profile| profile.name != extension.name)
            .map(|profile| (profile, FileStorage::new(profile.config_install_dir())));

        let mut documents = BTreeMap::new();
        for name in names {
            let overridden = profile_storage.as_ref().and_then(|(profile, storage)| {
                let path = storage.file_path(collection, &name);
                path.is_file().then_some((*profile, path))
            });

            let data = match overridden {
                Some((profile, path)) => {
                    tracing::debug!(
                        extension = %extension.name,
                        profile = %profile.name,
                        name = %name,
                        "Using install profile default"
                    );
                    read_default(profile, collection, &name, &path)?
                }
                None => read_default(
                    extension,
                    collection,
                    &name,
                    &storage.file_path(collection, &name),
                )?,
            };
            documents.insert(name, data);
        }

        Ok(documents)
    }

    /// Override collections the extension ships defaults for
    pub fn bundled_collections(&self, extension: &Extension) -> Result<BTreeSet<String>> {
        let install_dir = extension.config_install_dir();
        FileStorage::new(&install_dir).collections().map_err(|e| {
            scan_failed(
                &extension.name,
                "*",
                install_dir.display().to_string(),
                e.to_string(),
            )
        })
    }

    /// Scan every given collection for one extension
    pub fn scan(&self, extension: &Extension, collections: &[String]) -> Result<ScannedDefaults> {
        let mut scanned = ScannedDefaults::new(&extension.name);
        for collection in collections {
            let documents = self.scan_defaults(extension, collection)?;
            if !documents.is_empty() {
                scanned.documents.insert(collection.clone(), documents);
            }
        }

        tracing::debug!(
            extension = %extension.name,
            documents = scanned.len(),
            "Scanned bundled defaults"
        );
        Ok(scanned)
    }
}

fn read_default(
    extension: &Extension,
    collection: &str,
    name: &str,
    path: &Path,
) -> Result<Mapping> {
    let fail = |reason: String| {
        scan_failed(
            &extension.name,
            collection,
            path.display().to_string(),
            reason,
        )
    };

    validate_name(name).map_err(|e| fail(e.to_string()))?;
    let contents = fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
    decode_document(&contents).map_err(fail)
}
