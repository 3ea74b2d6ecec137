//! Uninstall and reinstall tests against a site on disk

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use confsync::error::ConfsyncError;
use confsync::installer::ConflictReport;

fn install(site: &common::TestSite, names: &[&str]) {
    let opened = site.open();
    let names: Vec<String> = names.iter().map(|n| (*n).to_string()).collect();
    let order = opened.install_order(&names).unwrap();
    opened.installer().unwrap().install(&order).unwrap();
}

#[test]
fn test_uninstall_removes_owned_defaults_only() {
    let site = common::TestSite::new();
    site.add_extension(
        "a",
        "A",
        &[],
        &[
            ("a.settings.yml", "foo: default\n"),
            ("language/fr/a.settings.yml", "foo: défaut\n"),
        ],
    );
    site.write_active("unrelated.settings.yml", "keep: true\n");
    install(&site, &["a"]);

    let report = site.open().installer().unwrap().uninstall(&["a"]).unwrap();

    assert_eq!(report.deleted, vec!["a.settings"]);
    assert!(!site.active_exists("a.settings.yml"));
    assert!(site.active_exists("language/fr/a.settings.yml"));
    assert!(site.active_exists("unrelated.settings.yml"));
}

#[test]
fn test_uninstall_unknown_extension_changes_nothing() {
    let site = common::TestSite::new();
    site.add_extension("a", "A", &[], &[("a.settings.yml", "foo: default\n")]);
    install(&site, &["a"]);
    let before = site.active_snapshot();

    let err = site
        .open()
        .installer()
        .unwrap()
        .uninstall(&["a", "b"])
        .unwrap_err();

    assert!(matches!(err, ConfsyncError::ExtensionNotInstalled { ref name } if name == "b"));
    assert_eq!(site.active_snapshot(), before);
}

#[test]
fn test_reinstall_with_stale_override() {
    let site = common::TestSite::new();
    site.add_extension("a", "A", &[], &[("a.settings.yml", "foo: default\n")]);
    install(&site, &["a"]);
    site.write_active("language/fr/a.settings.yml", "foo: Je suis Charlie\n");

    let opened = site.open();
    let extension = opened.extensions.require("a").unwrap().clone();
    let mut installer = opened.installer().unwrap();
    let err = installer.reinstall(&[extension]).unwrap_err();

    let ConfsyncError::PreExistingConfig(conflict) = err else {
        panic!("expected a pre-existing config error");
    };
    let expected: ConflictReport = [("language.fr", "a.settings")].into_iter().collect();
    assert_eq!(conflict.config_objects, expected);
    assert_eq!(
        conflict.message,
        "Unable to install A, language/fr/a.settings already exists in active configuration"
    );

    // The uninstall half went through; the override is still there
    assert!(!site.active_exists("a.settings.yml"));
    assert!(site.active_exists("language/fr/a.settings.yml"));
    assert!(installer.installed_extensions().unwrap().is_empty());
}

#[test]
fn test_reinstall_restores_shipped_defaults() {
    let site = common::TestSite::new();
    site.add_extension("a", "A", &[], &[("a.settings.yml", "foo: default\n")]);
    install(&site, &["a"]);
    site.write_active("a.settings.yml", "foo: customized\n");

    let opened = site.open();
    let extension = opened.extensions.require("a").unwrap().clone();
    let report = opened
        .installer()
        .unwrap()
        .reinstall(&[extension])
        .unwrap();

    assert_eq!(report.uninstall.deleted, vec!["a.settings"]);
    assert_eq!(report.install.installed, vec!["a"]);
    assert!(site.read_active("a.settings.yml").contains("default"));
}

#[test]
fn test_hooks_see_every_extension() {
    let site = common::TestSite::new();
    site.add_extension("a", "A", &[], &[("a.settings.yml", "foo: 1\n")]);
    site.add_extension("b", "B", &["a"], &[("b.settings.yml", "foo: 1\n")]);

    let opened = site.open();
    let order = opened.install_order(&["b".to_string()]).unwrap();
    let mut installer = opened.installer().unwrap();

    let events = Rc::new(RefCell::new(Vec::new()));
    let installed = Rc::clone(&events);
    installer
        .hooks_mut()
        .register_post_install_observer(move |ext| {
            installed.borrow_mut().push(format!("install:{ext}"));
            Ok(())
        });
    let uninstalled = Rc::clone(&events);
    installer
        .hooks_mut()
        .register_post_uninstall_observer(move |ext| {
            uninstalled.borrow_mut().push(format!("uninstall:{ext}"));
            Err("cache clear failed".to_string())
        });

    installer.install(&order).unwrap();
    let report = installer.uninstall(&["b", "a"]).unwrap();

    assert_eq!(
        *events.borrow(),
        vec!["install:a", "install:b", "uninstall:b", "uninstall:a"]
    );
    assert_eq!(report.hook_failures.len(), 2);
    assert_eq!(report.uninstalled, vec!["b", "a"]);
}

#[test]
fn test_modified_config_after_local_edit() {
    let site = common::TestSite::new();
    site.add_extension(
        "a",
        "A",
        &[],
        &[("a.settings.yml", "foo: 1\n"), ("a.other.yml", "bar: 1\n")],
    );
    install(&site, &["a"]);
    site.write_active("a.settings.yml", "foo: 2\n");

    let modified = site.open().installer().unwrap().modified_config("a").unwrap();
    assert_eq!(modified, vec!["a.settings"]);
}
