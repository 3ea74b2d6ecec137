//! Site settings (confsync.yaml)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config_parse_failed, config_read_failed};

/// Settings file name at the site root
pub const SETTINGS_FILE: &str = "confsync.yaml";

fn default_extensions_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("extensions")]
}

fn default_active_config_dir() -> PathBuf {
    PathBuf::from("config/active")
}

/// Contents of `confsync.yaml`
///
/// Relative paths are resolved against the site root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Directories searched for extensions, in priority order
    #[serde(default = "default_extensions_dirs")]
    pub extensions_dirs: Vec<PathBuf>,

    /// Where active configuration is stored
    #[serde(default = "default_active_config_dir")]
    pub active_config_dir: PathBuf,

    /// Active language codes; each adds a `language.<code>` collection
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locales: Vec<String>,

    /// Install profile whose defaults replace same-named extension defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            extensions_dirs: default_extensions_dirs(),
            active_config_dir: default_active_config_dir(),
            locales: Vec::new(),
            profile: None,
        }
    }
}

impl SiteSettings {
    /// Parse settings from YAML
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file is a site with default settings
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Read settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&contents)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Serialize settings to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ConfsyncError;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = SiteSettings::from_yaml("").unwrap();
        assert_eq!(settings, SiteSettings::default());
        assert_eq!(settings.extensions_dirs, vec![PathBuf::from("extensions")]);
        assert_eq!(settings.active_config_dir, PathBuf::from("config/active"));
    }

    #[test]
    fn test_partial_settings() {
        let settings = SiteSettings::from_yaml("locales: [fr, de]\nprofile: testing\n").unwrap();
        assert_eq!(settings.locales, vec!["fr", "de"]);
        assert_eq!(settings.profile.as_deref(), Some("testing"));
        assert_eq!(settings.active_config_dir, PathBuf::from("config/active"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let settings = SiteSettings {
            locales: vec!["fr".to_string()],
            ..SiteSettings::default()
        };
        let yaml = settings.to_yaml().unwrap();
        assert!(!yaml.contains("profile"));
        assert_eq!(SiteSettings::from_yaml(&yaml).unwrap(), settings);
    }

    #[test]
    fn test_load_errors() {
        let temp = TempDir::new().unwrap();
        let missing = SiteSettings::load(&temp.path().join(SETTINGS_FILE)).unwrap_err();
        assert!(matches!(missing, ConfsyncError::ConfigReadFailed { .. }));

        let path = temp.path().join(SETTINGS_FILE);
        fs::write(&path, "locales: {").unwrap();
        let invalid = SiteSettings::load(&path).unwrap_err();
        assert!(matches!(invalid, ConfsyncError::ConfigParseFailed { .. }));
    }
}
