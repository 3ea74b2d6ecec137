//! Extension discovery in the site's extension directories

use std::collections::BTreeMap;
use std::path::PathBuf;

use walkdir::WalkDir;

use super::{Extension, INFO_FILE_SUFFIX};
use crate::error::{Result, extension_not_found};

/// How deep below an extensions directory info files are searched for
const MAX_DISCOVERY_DEPTH: usize = 4;

/// All extensions available to a site, keyed by machine name
#[derive(Debug, Clone, Default)]
pub struct ExtensionList {
    extensions: BTreeMap<String, Extension>,
}

impl ExtensionList {
    /// Find every `<name>.info.yml` below the given directories
    ///
    /// Missing directories are skipped. When two directories provide the same
    /// machine name, the first one wins.
    pub fn discover(dirs: &[PathBuf]) -> Result<Self> {
        let mut list = Self::default();

        for dir in dirs.iter().filter(|d| d.is_dir()) {
            let mut info_files: Vec<PathBuf> = WalkDir::new(dir)
                .follow_links(true)
                .max_depth(MAX_DISCOVERY_DEPTH)
                .into_iter()
                .filter_entry(|e| e.file_name() != "config")
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().is_file())
                .filter(|e| {
                    e.file_name()
                        .to_str()
                        .is_some_and(|n| n.ends_with(INFO_FILE_SUFFIX))
                })
                .map(walkdir::DirEntry::into_path)
                .collect();
            info_files.sort();

            for info_file in info_files {
                let extension = Extension::from_info_file(&info_file)?;
                if let Some(existing) = list.extensions.get(&extension.name) {
                    tracing::warn!(
                        extension = %extension.name,
                        kept = %existing.path.display(),
                        ignored = %extension.path.display(),
                        "Duplicate extension ignored"
                    );
                    continue;
                }
                list.extensions.insert(extension.name.clone(), extension);
            }
        }

        tracing::debug!(count = list.extensions.len(), "Discovered extensions");
        Ok(list)
    }

    pub fn from_extensions(extensions: impl IntoIterator<Item = Extension>) -> Self {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| (e.name.clone(), e))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Extension> {
        self.extensions.get(name)
    }

    /// Look up an extension, failing when it does not exist
    pub fn require(&self, name: &str) -> Result<&Extension> {
        self.get(name).ok_or_else(|| extension_not_found(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.values()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}
