//! Site management
//!
//! A site is a directory holding `confsync.yaml`, the extensions available to
//! it and its active configuration:
//!
//! ```text
//! site/
//! ├── confsync.yaml      # Site settings
//! ├── extensions/        # Extension directories
//! └── config/
//!     └── active/        # Active configuration, one YAML file per object
//!         ├── core.extension.yml
//!         └── language/
//!             └── fr/
//! ```

pub mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use crate::collection::CollectionResolver;
use crate::config::ConfigFactory;
use crate::error::{ConfsyncError, Result};
use crate::extension::{Extension, ExtensionList, sort};
use crate::installer::{DefaultConfigScanner, Installer};
use crate::storage::FileStorage;

pub use settings::{SETTINGS_FILE, SiteSettings};

/// A site and the extensions it can install
#[derive(Debug)]
pub struct Site {
    /// Directory holding `confsync.yaml`
    pub root: PathBuf,
    pub settings: SiteSettings,
    pub extensions: ExtensionList,
}

impl Site {
    /// Whether a site exists at the given path
    pub fn exists(root: &Path) -> bool {
        root.join(SETTINGS_FILE).is_file()
    }

    /// Find the closest site at or above `start`
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        let start = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
        start
            .ancestors()
            .find(|dir| Self::exists(dir))
            .map(Path::to_path_buf)
    }

    /// Open an existing site
    pub fn open(root: &Path) -> Result<Self> {
        if !Self::exists(root) {
            return Err(ConfsyncError::SiteNotFound {
                path: root.display().to_string(),
            });
        }

        let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        let settings = SiteSettings::load(&root.join(SETTINGS_FILE))?;
        let dirs: Vec<PathBuf> = settings
            .extensions_dirs
            .iter()
            .map(|dir| root.join(dir))
            .collect();
        let extensions = ExtensionList::discover(&dirs)?;

        tracing::debug!(
            root = %root.display(),
            extensions = extensions.len(),
            "Opened site"
        );
        Ok(Self {
            root,
            settings,
            extensions,
        })
    }

    /// Create a site with default settings, or open the one already there
    pub fn init(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        let settings_path = root.join(SETTINGS_FILE);
        let settings = if settings_path.exists() {
            SiteSettings::load(&settings_path)?
        } else {
            let settings = SiteSettings::default();
            fs::write(&settings_path, settings.to_yaml()?)?;
            tracing::info!(root = %root.display(), "Initialized site");
            settings
        };

        for dir in &settings.extensions_dirs {
            fs::create_dir_all(root.join(dir))?;
        }
        fs::create_dir_all(root.join(&settings.active_config_dir))?;
        Self::open(root)
    }

    /// Absolute path of the active configuration directory
    pub fn active_config_dir(&self) -> PathBuf {
        self.root.join(&self.settings.active_config_dir)
    }

    /// The install profile declared in settings
    pub fn profile(&self) -> Result<Option<&Extension>> {
        self.settings
            .profile
            .as_deref()
            .map(|name| self.extensions.require(name))
            .transpose()
    }

    /// Extensions to install for the requested names, dependencies first
    pub fn install_order(&self, names: &[String]) -> Result<Vec<Extension>> {
        sort::install_order(names, &self.extensions)
    }

    /// Installer wired to this site's active configuration
    pub fn installer(&self) -> Result<Installer> {
        let storage = FileStorage::new(self.active_config_dir());
        let mut scanner = DefaultConfigScanner::new();
        if let Some(profile) = self.profile()? {
            scanner = scanner.with_profile(profile.clone());
        }

        Ok(Installer::new(ConfigFactory::new(storage))
            .with_collections(CollectionResolver::new(self.settings.locales.iter().cloned()))
            .with_scanner(scanner))
    }
}
