//! Detection of configuration that would be overwritten by an install
//!
//! Candidates are intersected with the names already present in storage for
//! every collection. Detection always runs over every collection so the
//! resulting report lists every clash, not only the first one found.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use super::scanner::ScannedDefaults;
use crate::error::Result;
use crate::storage::{StorageBackend, qualified_name};

/// Config names an install would create, keyed by collection
pub type Candidates = BTreeMap<String, BTreeSet<String>>;

/// Existing configuration that an install would overwrite
///
/// Collections iterate default first, then lexicographically, which is the
/// order the collection resolver produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConflictReport {
    collections: BTreeMap<String, BTreeSet<String>>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collection: impl Into<String>, name: impl Into<String>) {
        self.collections
            .entry(collection.into())
            .or_default()
            .insert(name.into());
    }

    /// Add every entry of another report
    pub fn merge(&mut self, other: &ConflictReport) {
        for (collection, names) in &other.collections {
            self.collections
                .entry(collection.clone())
                .or_default()
                .extend(names.iter().cloned());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Number of conflicting objects across all collections
    pub fn len(&self) -> usize {
        self.collections.values().map(BTreeSet::len).sum()
    }

    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Conflicting names of one collection, in order
    pub fn names(&self, collection: &str) -> Vec<&str> {
        self.collections
            .get(collection)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn as_map(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.collections
    }

    /// Collection-qualified names: default names bare, overrides as
    /// `language/fr/<name>`
    pub fn qualified_names(&self) -> Vec<String> {
        self.collections
            .iter()
            .flat_map(|(collection, names)| {
                names.iter().map(move |name| qualified_name(collection, name))
            })
            .collect()
    }
}

impl<C: Into<String>, N: Into<String>> FromIterator<(C, N)> for ConflictReport {
    fn from_iter<I: IntoIterator<Item = (C, N)>>(iter: I) -> Self {
        let mut report = Self::new();
        for (collection, name) in iter {
            report.insert(collection, name);
        }
        report
    }
}

/// Message shown when an install is refused
///
/// ```text
/// Unable to install B, x.settings already exists in active configuration
/// Unable to install C, x.settings, language/fr/x.settings already exist in active configuration
/// ```
pub fn conflict_message(display_name: &str, report: &ConflictReport) -> String {
    let verb = if report.len() == 1 {
        "already exists"
    } else {
        "already exist"
    };
    format!(
        "Unable to install {}, {} {} in active configuration",
        display_name,
        report.qualified_names().join(", "),
        verb
    )
}

/// An install was refused because its defaults clash with active configuration
#[derive(Error, Diagnostic, Debug, Clone)]
#[error("{message}")]
#[diagnostic(
    code(confsync::install::pre_existing_config),
    help("Delete or rename the listed configuration objects, then install again")
)]
pub struct PreExistingConfigError {
    /// Machine name of the first extension whose defaults clash
    pub extension: String,
    /// Every clashing object in the batch, by collection
    pub config_objects: ConflictReport,
    pub message: String,
}

impl PreExistingConfigError {
    /// Build the error, naming every extension whose defaults clash
    pub fn new(
        extension: impl Into<String>,
        display_names: &[&str],
        config_objects: ConflictReport,
    ) -> Self {
        let message = conflict_message(&display_names.join(", "), &config_objects);
        Self {
            extension: extension.into(),
            config_objects,
            message,
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn config_objects(&self) -> &ConflictReport {
        &self.config_objects
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Checks candidates against storage, read-only
#[derive(Debug)]
pub struct ConflictDetector<'a> {
    storage: &'a dyn StorageBackend,
    collections: &'a [String],
}

impl<'a> ConflictDetector<'a> {
    /// `collections` is the resolver's ordered collection list
    pub fn new(storage: &'a dyn StorageBackend, collections: &'a [String]) -> Self {
        Self {
            storage,
            collections,
        }
    }

    /// Intersect candidates with what storage already holds
    pub fn detect(&self, candidates: &Candidates) -> Result<ConflictReport> {
        let mut report = ConflictReport::new();
        for (collection, names) in candidates {
            let existing = self.storage.list_names(collection)?;
            for name in names.intersection(&existing) {
                report.insert(collection.as_str(), name.as_str());
            }
        }
        Ok(report)
    }

    /// Check a whole install batch, in install order
    ///
    /// Each extension is checked against storage and against the documents
    /// shipped by the extensions before it in the batch. Returns one report
    /// per extension that clashes.
    pub fn detect_batch(&self, batch: &[ScannedDefaults]) -> Result<Vec<(String, ConflictReport)>> {
        let mut claimed: HashMap<String, BTreeSet<String>> = HashMap::new();
        let mut conflicts = Vec::new();

        for scanned in batch {
            let candidates = scanned.candidates(self.collections);
            let mut report = ConflictReport::new();

            for (collection, names) in &candidates {
                let taken = self.claimed_in(&mut claimed, collection)?;
                for name in names.intersection(taken) {
                    report.insert(collection.as_str(), name.as_str());
                }
            }

            for (collection, documents) in &scanned.documents {
                self.claimed_in(&mut claimed, collection)?
                    .extend(documents.keys().cloned());
            }

            if !report.is_empty() {
                tracing::debug!(
                    extension = %scanned.extension,
                    conflicts = report.len(),
                    "Pre-existing configuration found"
                );
                conflicts.push((scanned.extension.clone(), report));
            }
        }

        Ok(conflicts)
    }

    fn claimed_in<'c>(
        &self,
        claimed: &'c mut HashMap<String, BTreeSet<String>>,
        collection: &str,
    ) -> Result<&'c mut BTreeSet<String>> {
        if !claimed.contains_key(collection) {
            let existing = self.storage.list_names(collection)?;
            claimed.insert(collection.to_string(), existing);
        }
        Ok(claimed.entry(collection.to_string()).or_default())
    }
}
