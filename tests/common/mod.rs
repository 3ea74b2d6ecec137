//! Common test utilities for confsync integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use walkdir::WalkDir;

use confsync::site::Site;

/// A temporary site for integration tests
pub struct TestSite {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to site root
    pub path: PathBuf,
}

impl TestSite {
    /// Create a new site with default settings
    pub fn new() -> Self {
        Self::with_settings("")
    }

    /// Create a new site with the given confsync.yaml contents
    pub fn with_settings(settings: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let site = Self { temp, path };
        if !settings.is_empty() {
            site.write_file("confsync.yaml", settings);
        }
        Site::init(&site.path).expect("Failed to initialize site");
        site
    }

    /// Create an extension with an info file and bundled defaults
    ///
    /// `files` are relative to the extension's `config/install` directory.
    pub fn add_extension(&self, name: &str, label: &str, deps: &[&str], files: &[(&str, &str)]) {
        let mut info = format!("name: '{label}'\ntype: module\n");
        if !deps.is_empty() {
            info.push_str("dependencies:\n");
            for dep in deps {
                info.push_str(&format!("  - {dep}\n"));
            }
        }
        self.write_file(&format!("extensions/{name}/{name}.info.yml"), &info);

        for (relative, contents) in files {
            self.write_file(
                &format!("extensions/{name}/config/install/{relative}"),
                contents,
            );
        }
    }

    /// Write a document straight into active configuration
    pub fn write_active(&self, relative: &str, contents: &str) {
        self.write_file(&format!("config/active/{relative}"), contents);
    }

    pub fn active_exists(&self, relative: &str) -> bool {
        self.file_exists(&format!("config/active/{relative}"))
    }

    pub fn read_active(&self, relative: &str) -> String {
        self.read_file(&format!("config/active/{relative}"))
    }

    /// Every file under active configuration with its contents
    pub fn active_snapshot(&self) -> BTreeMap<PathBuf, String> {
        let root = self.path.join("config/active");
        WalkDir::new(&root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let contents =
                    std::fs::read_to_string(e.path()).expect("Failed to read active file");
                let relative = e.path().strip_prefix(&root).unwrap_or(e.path()).to_path_buf();
                (relative, contents)
            })
            .collect()
    }

    /// Open the site through the library
    pub fn open(&self) -> Site {
        Site::open(&self.path).expect("Failed to open site")
    }

    /// Write a file in the site
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the site
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the site
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

/// confsync binary running inside `dir`, isolated from the caller's environment
pub fn confsync_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("confsync").expect("Failed to find confsync binary");
    cmd.env_remove("CONFSYNC_SITE");
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    cmd
}
