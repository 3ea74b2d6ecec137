//! confsync - extension configuration installer
//!
//! Installs the default configuration shipped by extensions into a site's
//! active configuration. Every install is checked against every collection
//! first and refused as a whole when it would overwrite existing
//! configuration.
//!
//! ```no_run
//! use confsync::site::Site;
//!
//! # fn main() -> confsync::error::Result<()> {
//! let site = Site::open(std::path::Path::new("."))?;
//! let order = site.install_order(&["config_test".to_string()])?;
//! let report = site.installer()?.install(&order)?;
//! println!("installed {:?}", report.installed);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod collection;
pub mod commands;
pub mod config;
pub mod error;
pub mod extension;
pub mod hash;
pub mod installer;
pub mod logging;
pub mod site;
pub mod storage;

pub use error::{ConfsyncError, Result};
