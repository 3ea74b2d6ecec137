//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - init: Init command arguments
//! - install: Install and reinstall command arguments
//! - uninstall: Uninstall command arguments
//! - list: List command arguments
//! - show: Show and delete command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod init;
pub mod install;
pub mod list;
pub mod show;
pub mod uninstall;

pub use completions::CompletionsArgs;
pub use init::InitArgs;
pub use install::{InstallArgs, ReinstallArgs};
pub use list::ListArgs;
pub use show::{DeleteArgs, ShowArgs};
pub use uninstall::UninstallArgs;

/// confsync - extension configuration installer
///
/// Install extension default configuration into a site's active configuration.
#[derive(Parser, Debug)]
#[command(
    name = "confsync",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install extension configuration into a site",
    long_about = "confsync installs the default configuration shipped by extensions into a site's \
                  active configuration, refusing installs that would overwrite existing \
                  configuration in any collection.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  confsync init                         \x1b[90m# Create confsync.yaml here\x1b[0m\n   \
                  confsync install config_test          \x1b[90m# Install with dependencies\x1b[0m\n   \
                  confsync uninstall config_test        \x1b[90m# Remove owned configuration\x1b[0m\n   \
                  confsync show system.cron             \x1b[90m# Print active configuration\x1b[0m\n   \
                  confsync collections                  \x1b[90m# List collections\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Site directory (defaults to the closest directory with confsync.yaml)
    #[arg(long, short = 's', global = true, env = "CONFSYNC_SITE")]
    pub site: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a site in the given directory
    Init(InitArgs),

    /// Install extensions and their dependencies
    Install(InstallArgs),

    /// Uninstall extensions
    Uninstall(UninstallArgs),

    /// Uninstall and install extensions again
    Reinstall(ReinstallArgs),

    /// List installed or available extensions
    List(ListArgs),

    /// Show an active configuration object
    Show(ShowArgs),

    /// Delete an active configuration object
    Delete(DeleteArgs),

    /// List configuration collections
    Collections,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
