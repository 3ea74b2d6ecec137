//! Extension errors

use super::ConfsyncError;

/// Creates an extension not found error
pub fn not_found(name: impl Into<String>) -> ConfsyncError {
    ConfsyncError::ExtensionNotFound { name: name.into() }
}

/// Creates an extension not installed error
pub fn not_installed(name: impl Into<String>) -> ConfsyncError {
    ConfsyncError::ExtensionNotInstalled { name: name.into() }
}

/// Creates a missing dependency error
pub fn missing_dependency(
    extension: impl Into<String>,
    dependency: impl Into<String>,
) -> ConfsyncError {
    ConfsyncError::MissingDependency {
        extension: extension.into(),
        dependency: dependency.into(),
    }
}

/// Creates a circular dependency error
pub fn circular(chain: impl Into<String>) -> ConfsyncError {
    ConfsyncError::CircularDependency {
        chain: chain.into(),
    }
}
