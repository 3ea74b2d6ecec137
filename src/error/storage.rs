//! Storage errors

use super::ConfsyncError;

/// Creates a storage read failed error
pub fn read_failed(
    collection: impl Into<String>,
    name: impl Into<String>,
    reason: impl Into<String>,
) -> ConfsyncError {
    ConfsyncError::StorageReadFailed {
        collection: collection.into(),
        name: name.into(),
        reason: reason.into(),
    }
}

/// Creates a storage write failed error
pub fn write_failed(
    collection: impl Into<String>,
    name: impl Into<String>,
    reason: impl Into<String>,
) -> ConfsyncError {
    ConfsyncError::StorageWriteFailed {
        collection: collection.into(),
        name: name.into(),
        reason: reason.into(),
    }
}

/// Creates a storage delete failed error
pub fn delete_failed(
    collection: impl Into<String>,
    name: impl Into<String>,
    reason: impl Into<String>,
) -> ConfsyncError {
    ConfsyncError::StorageDeleteFailed {
        collection: collection.into(),
        name: name.into(),
        reason: reason.into(),
    }
}

/// Creates a storage list failed error
pub fn list_failed(collection: impl Into<String>, reason: impl Into<String>) -> ConfsyncError {
    ConfsyncError::StorageListFailed {
        collection: collection.into(),
        reason: reason.into(),
    }
}
