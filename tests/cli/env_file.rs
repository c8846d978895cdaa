//! Tests for `generate-env-file`.

use crate::support::*;

#[test]
fn test_requires_vault_cli() {
    let t = Test::with_apps();

    let output = t.generate_env_file(&["--env", "dev"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "vault CLI not found");
    assert!(!t.exists("app-two-api-dev.env"));
}

#[test]
fn test_missing_manifest_reported() {
    let t = Test::new();
    std::fs::create_dir_all(t.root().join("empty-app")).unwrap();

    let output = t.generate_env_file(&["--env", "dev"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "manifest not found for env 'dev'");
}
