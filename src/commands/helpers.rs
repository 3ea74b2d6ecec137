//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::error::{ConfsyncError, Result};
use crate::site::Site;

/// Resolve site path from optional argument
///
/// If a site path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_site_path(site: Option<PathBuf>) -> Result<PathBuf> {
    match site {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| ConfsyncError::IoError {
            message: format!("Failed to get current directory: {}", e),
        }),
    }
}

/// Find the closest site at or above a directory
pub fn find_site_root(start: &Path) -> Result<PathBuf> {
    Site::find_from(start).ok_or_else(|| ConfsyncError::SiteNotFound {
        path: start.display().to_string(),
    })
}

/// Open the site selected on the command line
pub fn open_site(site: Option<PathBuf>) -> Result<Site> {
    let start = resolve_site_path(site)?;
    Site::open(&find_site_root(&start)?)
}
