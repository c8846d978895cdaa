//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate-policies"))
        .stdout(predicate::str::contains("generate-env-file"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_no_command_fails() {
    let t = Test::new();
    t.cmd().assert().failure();
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vaultmap"));
}

#[test]
fn test_missing_root() {
    let t = Test::new();

    let output = t.generate_policies(&["--appname", "main", "--project-id", "15"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "manifest root not found");
    assert_stderr_contains(&output, "VH_CONFIG_DIR");
}

#[test]
fn test_missing_vault_cli() {
    let t = Test::with_apps();

    let output = t.create(&["--env", "dev"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "vault CLI not found");
}

#[test]
fn test_env_required() {
    let t = Test::with_apps();

    let output = t.create(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "--env");
}

#[test]
fn test_env_from_environment_variable() {
    let t = Test::with_apps();

    // VH_ENV satisfies --env; the run then fails on the missing vault CLI.
    t.cmd()
        .arg("create")
        .env("VH_ENV", "dev")
        .assert()
        .failure()
        .stderr(predicate::str::contains("vault CLI not found"));
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::with_apps();

    let output = t
        .cmd()
        .args(["--verbose", "generate-policies", "--appname", "main", "--project-id", "15"])
        .output()
        .unwrap();
    assert_success(&output);
}
