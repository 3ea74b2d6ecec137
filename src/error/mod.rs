//! Error types and handling for confsync
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration object and settings errors
//! - [`extension`]: Extension discovery and dependency errors
//! - [`scan`]: Bundled default configuration errors
//! - [`storage`]: Active configuration storage errors

pub mod config;
pub mod extension;
pub mod scan;
pub mod storage;

pub use config::{
    invalid_collection, invalid_name as invalid_config_name, not_found as config_not_found,
    protected as config_protected,
    parse_failed as config_parse_failed, read_failed as config_read_failed,
};
pub use extension::{
    circular as circular_dependency, missing_dependency, not_found as extension_not_found,
    not_installed as extension_not_installed,
};
pub use scan::failed as scan_failed;
pub use storage::{
    delete_failed as storage_delete_failed, list_failed as storage_list_failed,
    read_failed as storage_read_failed, write_failed as storage_write_failed,
};

use miette::Diagnostic;
use thiserror::Error;

use crate::installer::conflict::PreExistingConfigError;

/// Main error type for confsync operations
#[derive(Error, Diagnostic, Debug)]
pub enum ConfsyncError {
    // Extension errors
    #[error("Extension '{name}' not found")]
    #[diagnostic(
        code(confsync::extension::not_found),
        help("Check that the extension directory contains <name>/<name>.info.yml")
    )]
    ExtensionNotFound { name: String },

    #[error("Extension '{name}' is not installed")]
    #[diagnostic(code(confsync::extension::not_installed))]
    ExtensionNotInstalled { name: String },

    #[error("Invalid extension info file: {path}: {reason}")]
    #[diagnostic(code(confsync::extension::invalid_info))]
    InvalidExtensionInfo { path: String, reason: String },

    #[error("Extension '{extension}' requires missing dependency '{dependency}'")]
    #[diagnostic(
        code(confsync::extension::missing_dependency),
        help("Add the dependency to one of the configured extension directories")
    )]
    MissingDependency {
        extension: String,
        dependency: String,
    },

    #[error("Circular dependency detected: {chain}")]
    #[diagnostic(
        code(confsync::extension::circular),
        help("Remove the circular dependency from the extension info files")
    )]
    CircularDependency { chain: String },

    #[error("Extension '{extension}' is required by installed extensions: {dependents}")]
    #[diagnostic(
        code(confsync::extension::required),
        help("Uninstall the dependent extensions first")
    )]
    RequiredByInstalled {
        extension: String,
        dependents: String,
    },

    // Bundled default configuration errors
    #[error("Malformed default configuration '{path}' in extension '{extension}': {reason}")]
    #[diagnostic(
        code(confsync::scan::malformed),
        help("Bundled defaults must be YAML documents whose top level is a mapping")
    )]
    ScanFailed {
        extension: String,
        collection: String,
        path: String,
        reason: String,
    },

    // Conflicts with active configuration
    #[error(transparent)]
    #[diagnostic(transparent)]
    PreExistingConfig(#[from] PreExistingConfigError),

    // Storage errors
    #[error("Failed to read configuration '{name}' from collection '{collection}': {reason}")]
    #[diagnostic(code(confsync::storage::read_failed))]
    StorageReadFailed {
        collection: String,
        name: String,
        reason: String,
    },

    #[error("Failed to write configuration '{name}' to collection '{collection}': {reason}")]
    #[diagnostic(code(confsync::storage::write_failed))]
    StorageWriteFailed {
        collection: String,
        name: String,
        reason: String,
    },

    #[error("Failed to delete configuration '{name}' from collection '{collection}': {reason}")]
    #[diagnostic(code(confsync::storage::delete_failed))]
    StorageDeleteFailed {
        collection: String,
        name: String,
        reason: String,
    },

    #[error("Failed to list collection '{collection}': {reason}")]
    #[diagnostic(code(confsync::storage::list_failed))]
    StorageListFailed { collection: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration name '{name}': {reason}")]
    #[diagnostic(
        code(confsync::config::invalid_name),
        help("Configuration names are dotted, e.g. system.cron")
    )]
    InvalidConfigName { name: String, reason: String },

    #[error("Configuration '{name}' not found in collection '{collection}'")]
    #[diagnostic(
        code(confsync::config::not_found),
        help("Run 'confsync list --config' to see active configuration")
    )]
    ConfigNotFound { collection: String, name: String },

    #[error("Configuration '{name}' is managed by confsync and cannot be deleted")]
    #[diagnostic(
        code(confsync::config::protected),
        help("Use 'confsync uninstall' to remove installed extensions")
    )]
    ConfigProtected { name: String },

    #[error("Invalid collection name '{name}'")]
    #[diagnostic(
        code(confsync::config::invalid_collection),
        help("Collection names are dotted, e.g. language.fr")
    )]
    InvalidCollectionName { name: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(confsync::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file {path}: {reason}")]
    #[diagnostic(code(confsync::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Site errors
    #[error("Site not found at: {path}")]
    #[diagnostic(
        code(confsync::site::not_found),
        help("Run 'confsync init' to create confsync.yaml")
    )]
    SiteNotFound { path: String },

    // Hook errors
    #[error("Hook '{hook}' failed for extension '{extension}': {reason}")]
    #[diagnostic(code(confsync::hook::failed))]
    HookFailed {
        hook: String,
        extension: String,
        reason: String,
    },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(confsync::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for ConfsyncError {
    fn from(err: std::io::Error) -> Self {
        ConfsyncError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ConfsyncError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfsyncError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfsyncError {
    fn from(err: serde_json::Error) -> Self {
        ConfsyncError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ConfsyncError>;
