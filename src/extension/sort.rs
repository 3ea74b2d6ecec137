//! Dependency ordering for extension installs
//!
//! Uses depth-first search with three-color marking:
//!
//! 1. **WHITE** (unvisited): extension hasn't been processed
//! 2. **GRAY** (on the current path): extension is being processed
//! 3. **BLACK** (done): extension and its dependencies are in the result
//!
//! Reaching a GRAY extension again means the dependency graph has a cycle.

use std::collections::{BTreeSet, HashSet};

use super::{Extension, ExtensionList};
use crate::error::{Result, circular_dependency, missing_dependency};

struct SortContext<'a> {
    list: &'a ExtensionList,
    /// BLACK
    visited: HashSet<String>,
    /// GRAY, in path order so cycles can be reported
    path: Vec<String>,
    result: Vec<Extension>,
}

/// Install order for the requested extensions and everything they require
///
/// Dependencies come before their dependents; otherwise the requested order is
/// preserved.
///
/// ```text
/// config_install_fail_test depends on config_test
///
/// Requested: [config_install_fail_test]
/// Result:    [config_test, config_install_fail_test]
/// ```
pub fn install_order(requested: &[String], list: &ExtensionList) -> Result<Vec<Extension>> {
    let mut ctx = SortContext {
        list,
        visited: HashSet::new(),
        path: Vec::new(),
        result: Vec::new(),
    };

    for name in requested {
        list.require(name)?;
        visit(&mut ctx, name)?;
    }

    Ok(ctx.result)
}

fn visit(ctx: &mut SortContext, name: &str) -> Result<()> {
    if let Some(start) = ctx.path.iter().position(|n| n == name) {
        let mut chain: Vec<&str> = ctx.path[start..].iter().map(String::as_str).collect();
        chain.push(name);
        return Err(circular_dependency(chain.join(" -> ")));
    }

    if ctx.visited.contains(name) {
        return Ok(());
    }

    let list = ctx.list;
    let extension = list.require(name)?;

    ctx.path.push(name.to_string());
    for dependency in &extension.dependencies {
        if list.get(dependency).is_none() {
            return Err(missing_dependency(name, dependency));
        }
        visit(ctx, dependency)?;
    }
    ctx.path.pop();

    ctx.visited.insert(name.to_string());
    ctx.result.push(extension.clone());
    Ok(())
}

/// Installed extensions that directly require `name`
pub fn dependents(name: &str, installed: &BTreeSet<String>, list: &ExtensionList) -> Vec<String> {
    installed
        .iter()
        .filter(|candidate| candidate.as_str() != name)
        .filter(|candidate| {
            list.get(candidate)
                .is_some_and(|e| e.dependencies.iter().any(|d| d == name))
        })
        .cloned()
        .collect()
}
