//! Uninstalling and reinstalling extensions
//!
//! Uninstall deletes the default-collection documents recorded as owned by
//! the extension. Override collections are left alone, so translations of an
//! uninstalled extension's configuration stay behind and are reported as
//! conflicts if the extension is installed again.

use std::collections::BTreeSet;

use serde::Serialize;

use super::{ExtensionIndex, Hook, HookFailure, InstallReport, Installer};
use crate::error::{Result, extension_not_installed};
use crate::extension::Extension;
use crate::storage::DEFAULT_COLLECTION;

/// Outcome of an uninstall
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UninstallReport {
    pub uninstalled: Vec<String>,
    /// Default-collection documents deleted
    pub deleted: Vec<String>,
    pub hook_failures: Vec<HookFailure>,
}

/// Outcome of a reinstall
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReinstallReport {
    pub uninstall: UninstallReport,
    pub install: InstallReport,
}

impl Installer {
    /// Uninstall extensions
    ///
    /// Every extension must be installed; nothing is deleted otherwise.
    pub fn uninstall(&mut self, extensions: &[&str]) -> Result<UninstallReport> {
        let mut index = ExtensionIndex::load(self.factory_mut())?;
        if let Some(missing) = extensions.iter().find(|e| !index.is_installed(e)) {
            return Err(extension_not_installed(*missing));
        }

        let mut report = UninstallReport::default();
        let mut seen = BTreeSet::new();
        for extension in extensions.iter().filter(|e| seen.insert(**e)) {
            let Some(entry) = index.remove(extension) else {
                continue;
            };

            for name in entry.owned_names() {
                if self.factory_mut().delete_name(DEFAULT_COLLECTION, name)? {
                    report.deleted.push(name.to_string());
                }
            }
            index.save(self.factory_mut())?;

            tracing::info!(
                extension,
                documents = entry.config.len(),
                "Uninstalled extension"
            );
            report.uninstalled.push((*extension).to_string());
            report
                .hook_failures
                .extend(self.hooks.notify(Hook::PostUninstall, extension));
        }

        Ok(report)
    }

    /// Uninstall whichever of the extensions are installed, then install all
    /// of them again
    pub fn reinstall(&mut self, extensions: &[Extension]) -> Result<ReinstallReport> {
        let installed = self.installed_extensions()?;
        let ids: Vec<&str> = extensions
            .iter()
            .map(|e| e.name.as_str())
            .filter(|name| installed.contains(*name))
            .collect();

        let uninstall = self.uninstall(&ids)?;
        let install = self.install(extensions)?;
        Ok(ReinstallReport { uninstall, install })
    }
}
