use std::fs;
use std::net::TcpListener;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn flowsync(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flowsync").expect("flowsync binary");
    cmd.current_dir(workdir.path())
        .env_remove("TAKTILE_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// A base URL nothing is listening on.
fn dead_base_url() -> String {
    let addr = TcpListener::bind("127.0.0.1:0")
        .expect("bind")
        .local_addr()
        .expect("addr");
    format!("http://{addr}/run/api/v1/flows")
}

#[test]
fn no_changed_files_exits_cleanly_without_network() {
    let workdir = TempDir::new().unwrap();
    // Any network call would fail against this config.
    fs::write(
        workdir.path().join("flowsync.yaml"),
        format!("base_url: {}\n", dead_base_url()),
    )
    .unwrap();

    flowsync(&workdir)
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub to Taktile Sync Started"))
        .stdout(predicate::str::contains("No changed scripts detected"));

    let log = fs::read_to_string(workdir.path().join("script_log.txt")).expect("log file");
    assert!(log.contains("] No changed scripts detected"));
}

#[test]
fn repeated_runs_append_to_the_log() {
    let workdir = TempDir::new().unwrap();
    flowsync(&workdir).assert().success();
    flowsync(&workdir).assert().success();

    let log = fs::read_to_string(workdir.path().join("script_log.txt")).expect("log file");
    assert_eq!(log.matches("No changed scripts detected").count(), 2);
}

#[test]
fn transport_failure_exits_non_zero() {
    let workdir = TempDir::new().unwrap();
    let config = workdir.path().join("ci.yaml");
    fs::write(&config, format!("base_url: {}\n", dead_base_url())).unwrap();

    flowsync(&workdir)
        .arg("--config")
        .arg(&config)
        .arg("scripts/foo.py")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Detecting changes for: ['foo']"))
        .stderr(predicate::str::contains("sync aborted"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let workdir = TempDir::new().unwrap();
    flowsync(&workdir)
        .args(["--config", "absent.yaml", "scripts/foo.py"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config not found"));
}

#[test]
fn custom_log_file_location_is_honoured() {
    let workdir = TempDir::new().unwrap();
    fs::write(
        workdir.path().join("flowsync.yaml"),
        "log_file: logs/sync.log\n",
    )
    .unwrap();

    flowsync(&workdir).assert().success();
    assert!(workdir.path().join("logs").join("sync.log").exists());
    assert!(!workdir.path().join("script_log.txt").exists());
}
