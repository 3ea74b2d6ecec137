//! Extensions: modules, themes and install profiles that ship configuration
//!
//! An extension is a directory holding a `<name>.info.yml` file and,
//! optionally, bundled default configuration:
//!
//! ```text
//! config_test/
//! ├── config_test.info.yml
//! └── config/
//!     └── install/
//!         ├── config_test.dynamic.dotted.default.yml   # default collection
//!         └── language/
//!             └── fr/
//!                 └── config_test.dynamic.dotted.default.yml
//! ```

pub mod discovery;
pub mod sort;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfsyncError, Result};

pub use discovery::ExtensionList;

/// Suffix of extension info files
pub const INFO_FILE_SUFFIX: &str = ".info.yml";

/// Directory, relative to the extension root, holding bundled defaults
pub const CONFIG_INSTALL_DIRECTORY: &str = "config/install";

/// Kind of extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionKind {
    #[default]
    Module,
    Theme,
    Profile,
}

impl std::fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            ExtensionKind::Module => "module",
            ExtensionKind::Theme => "theme",
            ExtensionKind::Profile => "profile",
        };
        f.write_str(kind)
    }
}

/// Contents of a `<name>.info.yml` file
#[derive(Debug, Clone, Deserialize)]
struct InfoFile {
    name: String,
    #[serde(rename = "type", default)]
    kind: ExtensionKind,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
}

/// An installable extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Machine name, taken from the info file name
    pub name: String,
    /// Human readable name
    pub label: String,
    pub kind: ExtensionKind,
    pub description: Option<String>,
    /// Machine names of required extensions
    pub dependencies: Vec<String>,
    /// Extension root directory
    pub path: PathBuf,
}

impl Extension {
    pub fn new(name: impl Into<String>, kind: ExtensionKind, path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind,
            description: None,
            dependencies: Vec::new(),
            path: path.into(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_dependencies(mut self, dependencies: &[&str]) -> Self {
        self.dependencies = dependencies.iter().map(|d| (*d).to_string()).collect();
        self
    }

    /// Load an extension from its info file
    pub fn from_info_file(path: &Path) -> Result<Self> {
        let invalid = |reason: String| ConfsyncError::InvalidExtensionInfo {
            path: path.display().to_string(),
            reason,
        };

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| invalid("not a file".to_string()))?;
        let name = file_name
            .strip_suffix(INFO_FILE_SUFFIX)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| invalid(format!("file name must end with {INFO_FILE_SUFFIX}")))?;

        let contents = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let info: InfoFile = serde_yaml::from_str(&contents).map_err(|e| invalid(e.to_string()))?;

        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self {
            name: name.to_string(),
            label: info.name,
            kind: info.kind,
            description: info.description,
            dependencies: info
                .dependencies
                .iter()
                .filter_map(|d| parse_dependency(d))
                .collect(),
            path: root,
        })
    }

    /// Name shown to people
    pub fn display_name(&self) -> &str {
        &self.label
    }

    /// Root of the bundled default configuration
    pub fn config_install_dir(&self) -> PathBuf {
        self.path.join(CONFIG_INSTALL_DIRECTORY)
    }
}

/// Machine name from a dependency declaration
///
/// Accepts `name`, `project:name` and an optional trailing version
/// constraint such as `name (>=8.x)`.
fn parse_dependency(declaration: &str) -> Option<String> {
    let without_constraint = declaration.split_whitespace().next()?;
    let name = without_constraint
        .rsplit(':')
        .next()
        .unwrap_or(without_constraint);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
