//! Active configuration storage
//!
//! A storage backend is a key-value store of configuration documents keyed by
//! a dotted configuration name and scoped by a collection name. The default
//! collection is the empty string; override collections are dotted names such
//! as `language.fr` and exist only while they hold at least one document.
//!
//! Two backends are provided:
//! - [`FileStorage`]: one YAML file per document, collections as sub-directories
//! - [`MemoryStorage`]: in-process maps, used for embedding and tests

pub mod file;
pub mod memory;

use std::collections::BTreeSet;

use serde_yaml::Mapping;

use crate::error::{Result, invalid_collection, invalid_config_name};

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Name of the default, locale-independent collection
pub const DEFAULT_COLLECTION: &str = "";

/// Label used when the default collection is shown to people
pub const DEFAULT_COLLECTION_LABEL: &str = "default";

/// Maximum length of a configuration name
pub const MAX_NAME_LENGTH: usize = 250;

/// Characters that may not appear in a configuration name
const RESERVED_NAME_CHARS: &[char] = &[':', '?', '*', '<', '>', '"', '\'', '/', '\\'];

/// Read/write access to one store of configuration documents
pub trait StorageBackend: std::fmt::Debug {
    /// Read a document, `None` when it does not exist
    fn read(&self, collection: &str, name: &str) -> Result<Option<Mapping>>;

    /// Create or replace a document
    fn write(&mut self, collection: &str, name: &str, data: &Mapping) -> Result<()>;

    /// Delete a document, returning whether it existed
    fn delete(&mut self, collection: &str, name: &str) -> Result<bool>;

    /// Names of all documents in a collection
    fn list_names(&self, collection: &str) -> Result<BTreeSet<String>>;

    /// Override collections currently holding at least one document
    fn collections(&self) -> Result<BTreeSet<String>>;

    fn exists(&self, collection: &str, name: &str) -> Result<bool> {
        Ok(self.list_names(collection)?.contains(name))
    }
}

/// Validate a configuration name
///
/// Names must contain a dot separating the owner prefix from the rest, may not
/// exceed [`MAX_NAME_LENGTH`] and may not contain path or glob characters.
pub fn validate_name(name: &str) -> Result<()> {
    if !name.contains('.') {
        return Err(invalid_config_name(
            name,
            "missing a namespace, e.g. system.site",
        ));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(invalid_config_name(
            name,
            format!("longer than {MAX_NAME_LENGTH} characters"),
        ));
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Err(invalid_config_name(name, "empty name segment"));
    }
    if let Some(c) = name.chars().find(|c| RESERVED_NAME_CHARS.contains(c)) {
        return Err(invalid_config_name(
            name,
            format!("contains reserved character '{c}'"),
        ));
    }
    Ok(())
}

/// Validate a collection name (the empty default collection is always valid)
pub fn validate_collection(collection: &str) -> Result<()> {
    if collection == DEFAULT_COLLECTION {
        return Ok(());
    }
    let valid = collection.split('.').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    });
    if valid {
        Ok(())
    } else {
        Err(invalid_collection(collection))
    }
}

/// Relative directory of a collection: `language.fr` -> `language/fr`
pub fn collection_path(collection: &str) -> String {
    collection.replace('.', "/")
}

/// Human label of a collection
pub fn collection_label(collection: &str) -> &str {
    if collection == DEFAULT_COLLECTION {
        DEFAULT_COLLECTION_LABEL
    } else {
        collection
    }
}

/// Collection-qualified configuration name
///
/// Default collection names are returned bare, override names are prefixed
/// with the collection path: `language/fr/system.site`.
pub fn qualified_name(collection: &str, name: &str) -> String {
    if collection == DEFAULT_COLLECTION {
        name.to_string()
    } else {
        format!("{}/{}", collection_path(collection), name)
    }
}
