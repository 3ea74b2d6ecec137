//! End-to-end tests of the confsync binary

mod common;

use predicates::prelude::*;
use serial_test::serial;

fn site_with_extensions() -> common::TestSite {
    let site = common::TestSite::new();
    site.add_extension(
        "config_test",
        "Configuration test",
        &[],
        &[
            ("config_test.dynamic.dotted.default.yml", "label: Default\nweight: 3\n"),
            ("language/fr/config_test.dynamic.dotted.default.yml", "label: Défaut\n"),
        ],
    );
    site.add_extension(
        "config_dependent",
        "Configuration dependent",
        &["config_test"],
        &[("config_dependent.settings.yml", "enabled: true\n")],
    );
    site
}

#[test]
fn test_init_creates_site() {
    let temp = tempfile::TempDir::new().unwrap();

    common::confsync_cmd(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    assert!(temp.path().join("confsync.yaml").is_file());
    assert!(temp.path().join("config/active").is_dir());

    common::confsync_cmd(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn test_commands_outside_site_fail() {
    let temp = tempfile::TempDir::new().unwrap();

    common::confsync_cmd(temp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Site not found"));
}

#[test]
fn test_install_with_dependencies() {
    let site = site_with_extensions();

    common::confsync_cmd(&site.path)
        .args(["install", "config_dependent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed config_test"))
        .stdout(predicate::str::contains("Installed config_dependent"))
        .stdout(predicate::str::contains("Wrote 3 configuration objects."));

    assert!(site.active_exists("config_test.dynamic.dotted.default.yml"));
    assert!(site.active_exists("language/fr/config_test.dynamic.dotted.default.yml"));
    assert!(site.active_exists("config_dependent.settings.yml"));
}

#[test]
fn test_install_json_report() {
    let site = site_with_extensions();

    let output = common::confsync_cmd(&site.path)
        .args(["install", "config_test", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["installed"], serde_json::json!(["config_test"]));
    assert_eq!(
        report["written"]["language.fr"],
        serde_json::json!(["config_test.dynamic.dotted.default"])
    );
}

#[test]
fn test_install_conflict_reports_message() {
    let site = site_with_extensions();
    site.write_active("config_test.dynamic.dotted.default.yml", "label: Mine\n");
    site.write_active(
        "language/fr/config_test.dynamic.dotted.default.yml",
        "label: La mienne\n",
    );
    let before = site.active_snapshot();

    common::confsync_cmd(&site.path)
        .args(["install", "config_test"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Unable to install Configuration test, config_test.dynamic.dotted.default, \
             language/fr/config_test.dynamic.dotted.default already exist in active configuration",
        ));

    assert_eq!(site.active_snapshot(), before);
}

#[test]
fn test_install_twice_skips() {
    let site = site_with_extensions();

    common::confsync_cmd(&site.path)
        .args(["install", "config_test"])
        .assert()
        .success();

    common::confsync_cmd(&site.path)
        .args(["install", "config_test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already installed"))
        .stdout(predicate::str::contains("Nothing to install."));
}

#[test]
fn test_uninstall_blocked_by_dependent() {
    let site = site_with_extensions();
    common::confsync_cmd(&site.path)
        .args(["install", "config_dependent"])
        .assert()
        .success();

    common::confsync_cmd(&site.path)
        .args(["uninstall", "config_test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required by installed extensions: config_dependent",
        ));

    common::confsync_cmd(&site.path)
        .args(["uninstall", "config_dependent", "config_test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 configuration objects."));

    assert!(!site.active_exists("config_test.dynamic.dotted.default.yml"));
    assert!(site.active_exists("language/fr/config_test.dynamic.dotted.default.yml"));
}

#[test]
fn test_uninstall_not_installed() {
    let site = site_with_extensions();

    common::confsync_cmd(&site.path)
        .args(["uninstall", "config_test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Extension 'config_test' is not installed",
        ));
}

#[test]
fn test_reinstall_then_delete_stale_override() {
    let site = site_with_extensions();
    common::confsync_cmd(&site.path)
        .args(["install", "config_test"])
        .assert()
        .success();

    // The shipped translation is already active, so a reinstall clashes with it
    common::confsync_cmd(&site.path)
        .args(["reinstall", "config_test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "language/fr/config_test.dynamic.dotted.default already exists",
        ));

    common::confsync_cmd(&site.path)
        .args([
            "delete",
            "config_test.dynamic.dotted.default",
            "--collection",
            "language.fr",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    common::confsync_cmd(&site.path)
        .args(["install", "config_test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed config_test"));
}

#[test]
fn test_delete_refuses_ledger() {
    let site = site_with_extensions();
    common::confsync_cmd(&site.path)
        .args(["install", "config_test"])
        .assert()
        .success();

    common::confsync_cmd(&site.path)
        .args(["delete", "core.extension"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Configuration 'core.extension' is managed by confsync",
        ));

    assert!(site.active_exists("core.extension.yml"));
    common::confsync_cmd(&site.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("config_test"));
}

#[test]
fn test_delete_stays_inside_active_config() {
    let site = site_with_extensions();

    common::confsync_cmd(&site.path)
        .args(["delete", "../../extensions/config_test/config_test.info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration name"));

    assert!(site.file_exists("extensions/config_test/config_test.info.yml"));
}

#[test]
fn test_show_yaml_and_json() {
    let site = site_with_extensions();
    common::confsync_cmd(&site.path)
        .args(["install", "config_test"])
        .assert()
        .success();

    common::confsync_cmd(&site.path)
        .args(["show", "config_test.dynamic.dotted.default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("label: Default"));

    common::confsync_cmd(&site.path)
        .args([
            "show",
            "config_test.dynamic.dotted.default",
            "-c",
            "language.fr",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"Défaut\""));

    common::confsync_cmd(&site.path)
        .args(["show", "missing.settings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Configuration 'missing.settings' not found in collection 'default'",
        ));
}

#[test]
fn test_list_variants() {
    let site = site_with_extensions();
    common::confsync_cmd(&site.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No extensions installed."));

    common::confsync_cmd(&site.path)
        .args(["install", "config_test"])
        .assert()
        .success();
    site.write_active("config_test.dynamic.dotted.default.yml", "label: Changed\n");

    common::confsync_cmd(&site.path)
        .args(["list", "--detailed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_test"))
        .stdout(predicate::str::contains("(modified)"));

    common::confsync_cmd(&site.path)
        .args(["list", "--available"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available extensions (2)"))
        .stdout(predicate::str::contains("not installed"));

    common::confsync_cmd(&site.path)
        .args(["list", "--config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("core.extension"))
        .stdout(predicate::str::contains("language.fr"));
}

#[test]
fn test_collections() {
    let site = common::TestSite::with_settings("locales: [de]\n");

    common::confsync_cmd(&site.path)
        .arg("collections")
        .assert()
        .success()
        .stdout(predicate::str::contains("default"))
        .stdout(predicate::str::contains("language.de"));
}

#[test]
fn test_site_from_nested_directory() {
    let site = site_with_extensions();
    let nested = site.path.join("extensions/config_test");

    common::confsync_cmd(&nested)
        .args(["install", "config_test"])
        .assert()
        .success();

    assert!(site.active_exists("config_test.dynamic.dotted.default.yml"));
}

#[test]
#[serial]
fn test_site_from_env() {
    let site = site_with_extensions();
    let elsewhere = tempfile::TempDir::new().unwrap();

    common::confsync_cmd(elsewhere.path())
        .env("CONFSYNC_SITE", &site.path)
        .args(["list", "--available"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_dependent"));
}

#[test]
fn test_completions() {
    let temp = tempfile::TempDir::new().unwrap();

    common::confsync_cmd(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confsync"));
}
