//! Config loading: file discovery, partial overrides, and error messages.

use std::path::PathBuf;

use assert_fs::prelude::*;
use flowsync_core::{Config, ConfigError};
use predicates::prelude::*;
use rstest::rstest;

#[test]
fn partial_yaml_keeps_defaults_for_missing_fields() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("flowsync.yaml");
    file.write_str("organization_name: ACME\nscripts_dir: src/nodes\n")
        .expect("write");

    let cfg = Config::load(Some(file.path())).expect("load");
    assert_eq!(cfg.organization_name, "ACME");
    assert_eq!(cfg.scripts_dir, PathBuf::from("src/nodes"));
    assert_eq!(cfg.environment, "sandbox");
    assert_eq!(cfg.log_file, PathBuf::from("script_log.txt"));
}

#[test]
fn explicit_missing_file_is_not_found() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let missing = dir.path().join("nope.yaml");
    let err = Config::load(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn parse_error_names_the_file() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("broken.yaml");
    file.write_str("base_url: [unclosed\n").expect("write");

    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(predicate::str::contains("broken.yaml").eval(err.to_string().as_str()));
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("typo.yaml");
    file.write_str("organisation_name: ACME\n").expect("write");

    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[test]
fn empty_file_yields_defaults() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("empty.yaml");
    file.touch().expect("touch");

    let cfg = Config::load(Some(file.path())).expect("load");
    assert_eq!(cfg, Config::default());
}

#[rstest]
#[case("py", "foo", "scripts/foo.py")]
#[case("sql", "report", "scripts/report.sql")]
#[case("", "Makefile", "scripts/Makefile")]
fn script_path_follows_extension(#[case] ext: &str, #[case] name: &str, #[case] expected: &str) {
    let cfg = Config {
        script_extension: ext.into(),
        ..Config::default()
    };
    assert_eq!(cfg.script_path(name), PathBuf::from(expected));
}
