//! Configuration errors

use super::ConfsyncError;

/// Creates an invalid config name error
pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> ConfsyncError {
    ConfsyncError::InvalidConfigName {
        name: name.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid collection name error
pub fn invalid_collection(name: impl Into<String>) -> ConfsyncError {
    ConfsyncError::InvalidCollectionName { name: name.into() }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> ConfsyncError {
    ConfsyncError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> ConfsyncError {
    ConfsyncError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an error for deleting a document confsync manages itself
pub fn protected(name: impl Into<String>) -> ConfsyncError {
    ConfsyncError::ConfigProtected { name: name.into() }
}

/// Creates a config not found error
pub fn not_found(collection: impl Into<String>, name: impl Into<String>) -> ConfsyncError {
    ConfsyncError::ConfigNotFound {
        collection: collection.into(),
        name: name.into(),
    }
}
