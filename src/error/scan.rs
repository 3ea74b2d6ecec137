//! Bundled default configuration errors

use super::ConfsyncError;

/// Creates a scan failed error for a malformed bundled default
pub fn failed(
    extension: impl Into<String>,
    collection: impl Into<String>,
    path: impl Into<String>,
    reason: impl Into<String>,
) -> ConfsyncError {
    ConfsyncError::ScanFailed {
        extension: extension.into(),
        collection: collection.into(),
        path: path.into(),
        reason: reason.into(),
    }
}
