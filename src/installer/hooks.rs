//! Post-install and post-uninstall observers
//!
//! Observers receive the machine name of the extension and run synchronously
//! in registration order. A failing observer does not stop the others and
//! never undoes configuration that has already been written.

use std::fmt;

use serde::Serialize;

use crate::error::ConfsyncError;

/// Outcome of a single observer call
pub type HookResult = std::result::Result<(), String>;

type Observer = Box<dyn Fn(&str) -> HookResult>;

/// Lifecycle points observers can attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    PostInstall,
    PostUninstall,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hook::PostInstall => "post_install",
            Hook::PostUninstall => "post_uninstall",
        };
        f.write_str(name)
    }
}

/// An observer that returned an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookFailure {
    pub hook: Hook,
    pub extension: String,
    pub reason: String,
}

impl From<HookFailure> for ConfsyncError {
    fn from(failure: HookFailure) -> Self {
        ConfsyncError::HookFailed {
            hook: failure.hook.to_string(),
            extension: failure.extension,
            reason: failure.reason,
        }
    }
}

/// Registered observers, per hook
#[derive(Default)]
pub struct HookRegistry {
    post_install: Vec<Observer>,
    post_uninstall: Vec<Observer>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `observer` after each extension of an install has been written
    pub fn register_post_install_observer(
        &mut self,
        observer: impl Fn(&str) -> HookResult + 'static,
    ) {
        self.post_install.push(Box::new(observer));
    }

    /// Run `observer` after each extension has been uninstalled
    pub fn register_post_uninstall_observer(
        &mut self,
        observer: impl Fn(&str) -> HookResult + 'static,
    ) {
        self.post_uninstall.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.post_install.len() + self.post_uninstall.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every observer of `hook` for `extension`
    pub fn notify(&self, hook: Hook, extension: &str) -> Vec<HookFailure> {
        let observers = match hook {
            Hook::PostInstall => &self.post_install,
            Hook::PostUninstall => &self.post_uninstall,
        };

        observers
            .iter()
            .filter_map(|observer| observer(extension).err())
            .map(|reason| {
                tracing::warn!(%hook, extension, %reason, "Hook observer failed");
                HookFailure {
                    hook,
                    extension: extension.to_string(),
                    reason,
                }
            })
            .collect()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("post_install", &self.post_install.len())
            .field("post_uninstall", &self.post_uninstall.len())
            .finish()
    }
}
