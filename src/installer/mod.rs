//! Installing extension default configuration into active configuration
//!
//! An install runs as a small state machine:
//!
//! ```text
//! Pending -> Scanning -> Checking -> Writing -> Complete
//!                            \
//!                             -> Conflict
//! ```
//!
//! Every extension of the batch is scanned and checked before anything is
//! written. When any default would overwrite existing configuration the whole
//! batch is refused with [`PreExistingConfigError`] and storage is untouched.
//! Writes are not transactional: a storage failure while writing leaves the
//! documents written so far in place.

pub mod conflict;
pub mod hooks;
pub mod index;
pub mod scanner;
pub mod uninstall;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::collection::CollectionResolver;
use crate::config::ConfigFactory;
use crate::error::{Result, extension_not_installed};
use crate::extension::Extension;
use crate::hash::{hash_document, verify_hash};
use crate::storage::DEFAULT_COLLECTION;

pub use conflict::{ConflictDetector, ConflictReport, PreExistingConfigError};
pub use hooks::{Hook, HookFailure, HookRegistry};
pub use index::{ExtensionIndex, InstalledExtension};
pub use scanner::{DefaultConfigScanner, ScannedDefaults};
pub use uninstall::{ReinstallReport, UninstallReport};

/// Where an install currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStage {
    #[default]
    Pending,
    Scanning,
    Checking,
    Conflict,
    Writing,
    Complete,
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            InstallStage::Pending => "pending",
            InstallStage::Scanning => "scanning",
            InstallStage::Checking => "checking",
            InstallStage::Conflict => "conflict",
            InstallStage::Writing => "writing",
            InstallStage::Complete => "complete",
        };
        f.write_str(stage)
    }
}

/// Outcome of a successful install
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// Extensions installed, in install order
    pub installed: Vec<String>,
    /// Requested extensions that were already installed
    pub skipped: Vec<String>,
    /// Documents written, by collection
    pub written: BTreeMap<String, BTreeSet<String>>,
    pub hook_failures: Vec<HookFailure>,
}

impl InstallReport {
    /// Number of documents written
    pub fn written_count(&self) -> usize {
        self.written.values().map(BTreeSet::len).sum()
    }
}

/// Installs and uninstalls extensions against one configuration store
#[derive(Debug)]
pub struct Installer {
    factory: ConfigFactory,
    collections: CollectionResolver,
    scanner: DefaultConfigScanner,
    hooks: HookRegistry,
    stage: InstallStage,
}

impl Installer {
    pub fn new(factory: ConfigFactory) -> Self {
        Self {
            factory,
            collections: CollectionResolver::default(),
            scanner: DefaultConfigScanner::default(),
            hooks: HookRegistry::default(),
            stage: InstallStage::Pending,
        }
    }

    #[must_use]
    pub fn with_collections(mut self, collections: CollectionResolver) -> Self {
        self.collections = collections;
        self
    }

    #[must_use]
    pub fn with_scanner(mut self, scanner: DefaultConfigScanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn factory(&self) -> &ConfigFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut ConfigFactory {
        &mut self.factory
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    pub fn collections(&self) -> &CollectionResolver {
        &self.collections
    }

    /// Stage reached by the last install
    pub fn stage(&self) -> InstallStage {
        self.stage
    }

    fn enter(&mut self, stage: InstallStage) {
        tracing::debug!(from = %self.stage, to = %stage, "Install stage");
        self.stage = stage;
    }

    /// Collections known right now, default first
    pub fn list_collections(&self) -> Result<Vec<String>> {
        self.collections.list_collections(self.factory.storage())
    }

    /// Machine names of installed extensions
    pub fn installed_extensions(&mut self) -> Result<BTreeSet<String>> {
        Ok(ExtensionIndex::load(&mut self.factory)?.installed())
    }

    pub fn is_installed(&mut self, extension: &str) -> Result<bool> {
        Ok(ExtensionIndex::load(&mut self.factory)?.is_installed(extension))
    }

    /// Install extensions, given in dependency order
    ///
    /// Already installed extensions are skipped. Fails with
    /// [`PreExistingConfigError`] without writing anything when any default
    /// of the batch already exists in active configuration, or clashes with a
    /// default of an earlier extension in the batch.
    pub fn install(&mut self, extensions: &[Extension]) -> Result<InstallReport> {
        self.enter(InstallStage::Pending);
        let mut index = ExtensionIndex::load(&mut self.factory)?;
        let mut report = InstallReport::default();

        let mut batch: Vec<&Extension> = Vec::new();
        for extension in extensions {
            if index.is_installed(&extension.name) || batch.iter().any(|e| e.name == extension.name)
            {
                tracing::debug!(extension = %extension.name, "Already installed, skipping");
                report.skipped.push(extension.name.clone());
            } else {
                batch.push(extension);
            }
        }

        if batch.is_empty() {
            self.enter(InstallStage::Complete);
            return Ok(report);
        }

        self.enter(InstallStage::Scanning);
        let mut introduced = BTreeSet::new();
        for extension in &batch {
            introduced.extend(self.scanner.bundled_collections(extension)?);
        }
        let collections = self
            .collections
            .list_collections_with(self.factory.storage(), introduced)?;

        let scanned = batch
            .iter()
            .map(|extension| self.scanner.scan(extension, &collections))
            .collect::<Result<Vec<_>>>()?;

        self.enter(InstallStage::Checking);
        let conflicts =
            ConflictDetector::new(self.factory.storage(), &collections).detect_batch(&scanned)?;

        if let Some((first, _)) = conflicts.first() {
            self.enter(InstallStage::Conflict);
            let first = first.clone();
            let mut config_objects = ConflictReport::new();
            let mut labels = Vec::new();
            for (name, conflict) in &conflicts {
                config_objects.merge(conflict);
                if let Some(extension) = batch.iter().find(|e| &e.name == name) {
                    labels.push(extension.display_name());
                }
            }
            return Err(PreExistingConfigError::new(first, &labels, config_objects).into());
        }

        self.enter(InstallStage::Writing);
        for (extension, defaults) in batch.iter().zip(&scanned) {
            let mut entry = InstalledExtension::new(extension.kind);
            for (collection, documents) in &defaults.documents {
                for (name, data) in documents {
                    self.factory.write(collection, name, data)?;
                    if collection == DEFAULT_COLLECTION {
                        entry.config.insert(name.clone(), hash_document(data)?);
                    }
                    report
                        .written
                        .entry(collection.clone())
                        .or_default()
                        .insert(name.clone());
                }
            }

            index.record(&extension.name, entry);
            index.save(&mut self.factory)?;
            tracing::info!(
                extension = %extension.name,
                documents = defaults.len(),
                "Installed extension"
            );
            report.installed.push(extension.name.clone());
        }

        for extension in &batch {
            report
                .hook_failures
                .extend(self.hooks.notify(Hook::PostInstall, &extension.name));
        }

        self.enter(InstallStage::Complete);
        Ok(report)
    }

    /// Owned names whose active content changed since install, or that have
    /// been deleted
    pub fn modified_config(&mut self, extension: &str) -> Result<Vec<String>> {
        let index = ExtensionIndex::load(&mut self.factory)?;
        let entry = index
            .get(extension)
            .ok_or_else(|| extension_not_installed(extension))?;

        let mut modified = Vec::new();
        for (name, expected) in &entry.config {
            let config = self.factory.get(name)?;
            if config.is_new() || !verify_hash(expected, &hash_document(config.get_all())?) {
                modified.push(name.clone());
            }
        }
        Ok(modified)
    }
}
