//! Ownership ledger of installed extensions
//!
//! Stored as the `core.extension` document of the default collection:
//!
//! ```yaml
//! extensions:
//!   config_test:
//!     type: module
//!     config:
//!       config_test.dynamic.dotted.default: blake3:4f1c...
//! ```
//!
//! Only default-collection names are recorded. Uninstall deletes exactly
//! these names and nothing else.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::config::ConfigFactory;
use crate::error::{ConfsyncError, Result, storage_write_failed};
use crate::extension::ExtensionKind;
use crate::storage::DEFAULT_COLLECTION;

/// Name of the ledger document
pub const EXTENSION_CONFIG_NAME: &str = "core.extension";

/// Ledger entry of one installed extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledExtension {
    #[serde(rename = "type", default)]
    pub kind: ExtensionKind,
    /// Owned config names and the hash of the content written at install time
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

impl InstalledExtension {
    pub fn new(kind: ExtensionKind) -> Self {
        Self {
            kind,
            config: BTreeMap::new(),
        }
    }

    pub fn owned_names(&self) -> impl Iterator<Item = &str> {
        self.config.keys().map(String::as_str)
    }
}

/// Every installed extension and the configuration it owns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionIndex {
    #[serde(default)]
    extensions: BTreeMap<String, InstalledExtension>,
}

impl ExtensionIndex {
    /// Read the ledger from active configuration
    ///
    /// A site that has never installed anything has an empty ledger.
    pub fn load(factory: &mut ConfigFactory) -> Result<Self> {
        let config = factory.get(EXTENSION_CONFIG_NAME)?;
        if config.is_new() {
            return Ok(Self::default());
        }

        serde_yaml::from_value(Value::Mapping(config.get_all().clone())).map_err(|e| {
            ConfsyncError::ConfigParseFailed {
                path: EXTENSION_CONFIG_NAME.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Write the ledger back to active configuration
    pub fn save(&self, factory: &mut ConfigFactory) -> Result<()> {
        let data = ledger_document(serde_yaml::to_value(self)?)?;
        factory.write(DEFAULT_COLLECTION, EXTENSION_CONFIG_NAME, &data)
    }

    pub fn is_installed(&self, extension: &str) -> bool {
        self.extensions.contains_key(extension)
    }

    /// Machine names of installed extensions
    pub fn installed(&self) -> BTreeSet<String> {
        self.extensions.keys().cloned().collect()
    }

    pub fn get(&self, extension: &str) -> Option<&InstalledExtension> {
        self.extensions.get(extension)
    }

    /// Record an extension as installed, replacing any earlier entry
    pub fn record(&mut self, extension: impl Into<String>, entry: InstalledExtension) {
        self.extensions.insert(extension.into(), entry);
    }

    pub fn remove(&mut self, extension: &str) -> Option<InstalledExtension> {
        self.extensions.remove(extension)
    }

    /// Installed extension owning a default-collection name
    pub fn owner_of(&self, name: &str) -> Option<&str> {
        self.extensions
            .iter()
            .find(|(_, entry)| entry.config.contains_key(name))
            .map(|(extension, _)| extension.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InstalledExtension)> {
        self.extensions.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

/// The serialized ledger as a document; anything but a mapping is refused
fn ledger_document(value: Value) -> Result<Mapping> {
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(storage_write_failed(
            DEFAULT_COLLECTION,
            EXTENSION_CONFIG_NAME,
            "ledger did not serialize to a mapping",
        )),
    }
}
