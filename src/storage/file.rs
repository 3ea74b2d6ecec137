//! File-backed storage
//!
//! Each document is one YAML file named `<config name>.yml`. The default
//! collection lives directly in the storage root and override collections in
//! sub-directories derived from their dotted names:
//!
//! ```text
//! config/active/
//! ├── system.cron.yml
//! └── language/
//!     └── fr/
//!         └── system.site.yml
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use walkdir::WalkDir;

use super::{DEFAULT_COLLECTION, StorageBackend, collection_path, validate_collection, validate_name};
use crate::error::{
    Result, storage_delete_failed, storage_list_failed, storage_read_failed, storage_write_failed,
};

/// File extension of configuration documents
pub const FILE_EXTENSION: &str = "yml";

/// Decode a YAML document into a configuration mapping
///
/// An empty document decodes to an empty mapping; any other non-mapping top
/// level is rejected.
pub fn decode_document(contents: &str) -> std::result::Result<Mapping, String> {
    let value: Value = serde_yaml::from_str(contents).map_err(|e| e.to_string())?;
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(format!(
            "expected a mapping at the top level, found {}",
            value_kind(&other)
        )),
    }
}

/// Encode a configuration mapping as a YAML document
pub fn encode_document(data: &Mapping) -> std::result::Result<String, String> {
    serde_yaml::to_string(data).map_err(|e| e.to_string())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Configuration names of all documents directly inside `dir`
///
/// A missing directory is an empty collection. A document whose file name is
/// not valid UTF-8 fails with [`ErrorKind::InvalidData`].
pub fn list_documents(dir: &Path) -> std::io::Result<BTreeSet<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => return Err(e),
    };

    let mut names = BTreeSet::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            return Err(std::io::Error::new(
                ErrorKind::InvalidData,
                format!("file name is not valid UTF-8: {}", path.display()),
            ));
        };
        names.insert(stem.to_string());
    }
    Ok(names)
}

/// Storage keeping each configuration document in its own YAML file
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `root` (created lazily on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a collection's documents
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        if collection == DEFAULT_COLLECTION {
            self.root.clone()
        } else {
            self.root.join(collection_path(collection))
        }
    }

    /// Path of a single document
    pub fn file_path(&self, collection: &str, name: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{name}.{FILE_EXTENSION}"))
    }

    /// Remove empty collection directories between `dir` and the root
    fn prune_empty_dirs(&self, mut dir: PathBuf) {
        while dir != self.root && dir.starts_with(&self.root) {
            let is_empty = fs::read_dir(&dir)
                .map(|mut d| d.next().is_none())
                .unwrap_or(false);
            if !is_empty || fs::remove_dir(&dir).is_err() {
                break;
            }
            if !dir.pop() {
                break;
            }
        }
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, collection: &str, name: &str) -> Result<Option<Mapping>> {
        validate_collection(collection)?;
        validate_name(name)?;
        let path = self.file_path(collection, name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_read_failed(collection, name, e.to_string())),
        };

        decode_document(&contents)
            .map(Some)
            .map_err(|reason| storage_read_failed(collection, name, reason))
    }

    fn write(&mut self, collection: &str, name: &str, data: &Mapping) -> Result<()> {
        validate_collection(collection)?;
        validate_name(name)?;

        let path = self.file_path(collection, name);
        let yaml =
            encode_document(data).map_err(|reason| storage_write_failed(collection, name, reason))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| storage_write_failed(collection, name, e.to_string()))?;
        }
        fs::write(&path, yaml).map_err(|e| storage_write_failed(collection, name, e.to_string()))
    }

    fn delete(&mut self, collection: &str, name: &str) -> Result<bool> {
        validate_collection(collection)?;
        validate_name(name)?;
        let path = self.file_path(collection, name);
        match fs::remove_file(&path) {
            Ok(()) => {
                if collection != DEFAULT_COLLECTION {
                    self.prune_empty_dirs(self.collection_dir(collection));
                }
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(storage_delete_failed(collection, name, e.to_string())),
        }
    }

    fn list_names(&self, collection: &str) -> Result<BTreeSet<String>> {
        validate_collection(collection)?;
        list_documents(&self.collection_dir(collection))
            .map_err(|e| storage_list_failed(collection, e.to_string()))
    }

    fn collections(&self) -> Result<BTreeSet<String>> {
        let mut collections = BTreeSet::new();
        if !self.root.is_dir() {
            return Ok(collections);
        }

        for entry in WalkDir::new(&self.root).min_depth(2) {
            let entry = entry.map_err(|e| storage_list_failed("*", e.to_string()))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION)
            {
                continue;
            }
            let Some(relative) = path.parent().and_then(|p| p.strip_prefix(&self.root).ok())
            else {
                continue;
            };
            let collection = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(".");
            if validate_collection(&collection).is_ok() {
                collections.insert(collection);
            }
        }

        Ok(collections)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mapping(yaml: &str) -> Mapping {
        decode_document(yaml).unwrap()
    }

    #[test]
    fn test_read_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        assert!(storage.read(DEFAULT_COLLECTION, "system.cron").unwrap().is_none());
    }

    #[test]
    fn test_write_read_default_collection() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path());
        let data = mapping("threshold:\n  autorun: 0\n");

        storage.write(DEFAULT_COLLECTION, "system.cron", &data).unwrap();

        assert!(temp.path().join("system.cron.yml").is_file());
        assert_eq!(
            storage.read(DEFAULT_COLLECTION, "system.cron").unwrap(),
            Some(data)
        );
    }

    #[test]
    fn test_override_collection_layout() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path());

        storage
            .write("language.fr", "system.site", &mapping("name: Bonjour"))
            .unwrap();

        assert!(temp.path().join("language/fr/system.site.yml").is_file());
        assert_eq!(
            storage.collections().unwrap().into_iter().collect::<Vec<_>>(),
            vec!["language.fr".to_string()]
        );
        assert!(storage.list_names(DEFAULT_COLLECTION).unwrap().is_empty());
    }

    #[test]
    fn test_delete_prunes_empty_collection() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path());
        storage
            .write("language.fr", "system.site", &mapping("name: Bonjour"))
            .unwrap();

        assert!(storage.delete("language.fr", "system.site").unwrap());
        assert!(!storage.delete("language.fr", "system.site").unwrap());
        assert!(storage.collections().unwrap().is_empty());
        assert!(!temp.path().join("language").exists());
    }

    #[test]
    fn test_read_malformed_document() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("broken.settings.yml"), "foo: [unclosed").unwrap();
        let storage = FileStorage::new(temp.path());

        let err = storage.read(DEFAULT_COLLECTION, "broken.settings").unwrap_err();
        assert!(matches!(err, crate::error::ConfsyncError::StorageReadFailed { .. }));
    }

    #[test]
    fn test_decode_document() {
        assert!(decode_document("").unwrap().is_empty());
        assert!(decode_document("- a\n- b\n").is_err());
        assert!(decode_document("just a string").is_err());
        assert_eq!(decode_document("foo: bar").unwrap().len(), 1);
    }

    #[test]
    fn test_list_names_ignores_other_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.settings.yml"), "foo: 1").unwrap();
        fs::write(temp.path().join("README.md"), "# readme").unwrap();
        fs::create_dir_all(temp.path().join("language/fr")).unwrap();

        let storage = FileStorage::new(temp.path());
        let names = storage.list_names(DEFAULT_COLLECTION).unwrap();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["a.settings"]);
    }

    #[test]
    fn test_write_rejects_invalid_name() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path());
        assert!(
            storage
                .write(DEFAULT_COLLECTION, "../escape", &Mapping::new())
                .is_err()
        );
    }

    #[test]
    fn test_names_cannot_escape_root() {
        let temp = TempDir::new().unwrap();
        let active = temp.path().join("config/active");
        fs::create_dir_all(&active).unwrap();
        fs::create_dir_all(temp.path().join("extensions/a")).unwrap();
        let info = temp.path().join("extensions/a/a.info.yml");
        fs::write(&info, "name: A\n").unwrap();

        let mut storage = FileStorage::new(&active);
        let escape = "../../extensions/a/a.info";

        assert!(matches!(
            storage.read(DEFAULT_COLLECTION, escape),
            Err(crate::error::ConfsyncError::InvalidConfigName { .. })
        ));
        assert!(matches!(
            storage.delete(DEFAULT_COLLECTION, escape),
            Err(crate::error::ConfsyncError::InvalidConfigName { .. })
        ));
        assert!(info.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_list_documents_rejects_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"bad\xff.settings.yml");
        fs::write(temp.path().join(name), "foo: 1").unwrap();

        let err = list_documents(temp.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
