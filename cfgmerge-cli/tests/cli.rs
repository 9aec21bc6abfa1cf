//! Integration tests for the cfgmerge command-line interface.
//!
//! These cover argument handling, settings discovery, output formats and
//! exit codes from the user's perspective.

mod common;

use common::TestEnv;
use predicates::prelude::*;

const BASE: &str = "definitions:\n  config:\n    /settings:\n      title: Base\n      mode: default\n";
const SITE: &str = "definitions:\n  config:\n    /settings:\n      title: Site\n";

fn two_modules(env: &TestEnv) {
    env.module("base", &[], BASE);
    env.module("site", &["base"], SITE);
}

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("order"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_build_renders_merged_tree_as_text() {
    let env = TestEnv::new();
    two_modules(&env);

    env.command()
        .args(["--format", "text", "build", "site", "base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  /settings\n"))
        .stdout(predicate::str::contains("    - title = Site"))
        .stdout(predicate::str::contains("    - mode = default"));
}

#[test]
fn test_build_json_subtree() {
    let env = TestEnv::new();
    two_modules(&env);

    let output = env
        .command()
        .args(["--format", "json", "build", "base", "site", "--path", "/settings"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["path"], "/settings");
    assert_eq!(json["properties"]["title"]["values"][0], "Site");
    assert_eq!(json["properties"]["title"]["sources"].as_array().unwrap().len(), 2);
}

#[test]
fn test_build_missing_path_fails() {
    let env = TestEnv::new();
    two_modules(&env);

    env.command()
        .args(["build", "base", "--path", "/nowhere"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No node at '/nowhere'"));
}

#[test]
fn test_build_relative_path_is_invalid_argument() {
    let env = TestEnv::new();
    two_modules(&env);

    env.command()
        .args(["build", "base", "--path", "settings"])
        .assert()
        .code(4);
}

#[test]
fn test_order_text_lists_modules_in_dependency_order() {
    let env = TestEnv::new();
    two_modules(&env);

    let output = env
        .command()
        .args(["--format", "text", "order", "site", "base"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let base = stdout.find("module base").unwrap();
    let site = stdout.find("module site").unwrap();
    assert!(base < site);
    assert!(stdout.starts_with("group g\n  project p\n"));
}

#[test]
fn test_order_yaml_by_default() {
    let env = TestEnv::new();
    two_modules(&env);

    env.command()
        .args(["order", "base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("groups:"))
        .stdout(predicate::str::contains("name: base"));
}

#[test]
fn test_validate_reports_success() {
    let env = TestEnv::new();
    two_modules(&env);

    env.command()
        .args(["validate", "base", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model is valid (2 module(s))"));
}

#[test]
fn test_validate_quiet_prints_nothing() {
    let env = TestEnv::new();
    two_modules(&env);

    env.command()
        .args(["--quiet", "validate", "base", "site"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cycle_fails_with_exit_code_one() {
    let env = TestEnv::new();
    env.module("a", &["b"], BASE);
    env.module("b", &["a"], "definitions:\n  config:\n    /other: {}\n");

    env.command()
        .args(["validate", "a", "b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("circular dependency"));
}

#[test]
fn test_missing_module_descriptor_is_read_error() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.path().join("empty")).unwrap();

    env.command().args(["validate", "empty"]).assert().code(5);
}

#[test]
fn test_no_modules_is_invalid_argument() {
    let env = TestEnv::new();

    env.command()
        .arg("validate")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("no module directories"));
}

#[test]
fn test_merge_warnings_go_to_stderr() {
    let env = TestEnv::new();
    env.module("base", &[], BASE);
    env.module("site", &["base"], "definitions:\n  config:\n    /settings:\n      title: Base\n");

    env.command()
        .args(["validate", "base", "site"])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains("equivalent to existing property"));

    env.command()
        .args(["--quiet", "validate", "base", "site"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_invalid_format_rejected() {
    let env = TestEnv::new();
    two_modules(&env);

    env.command()
        .args(["--format", "xml", "build", "base"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}
