//! Tests for `delete`.

use crate::support::*;

#[test]
fn test_requires_appname() {
    let t = Test::with_apps();

    let output = t.delete(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required value: appname");
}

#[test]
fn test_requires_vault_cli() {
    let t = Test::with_apps();

    let output = t.delete(&["--appname", "app-two-api"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "vault CLI not found");
}
