//! Command implementations for the confsync CLI

pub mod collections;
pub mod completions;
pub mod helpers;
pub mod init;
pub mod install;
pub mod list;
pub mod show;
pub mod uninstall;
