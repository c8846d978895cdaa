//! Tests for `generate-policies`.

use crate::support::*;

#[test]
fn test_generates_every_env() {
    let t = Test::with_apps();

    let output = t.generate_policies(&["--appname", "app-two-api", "--project-id", "15"]);
    assert_success(&output);

    assert_eq!(
        t.read("vh/generated/policies/app-two-api-dev.hcl"),
        policy_text(DEV_POLICY_PATHS)
    );
    assert_eq!(
        t.read("vh/generated/policies/app-two-api-prod.hcl"),
        policy_text(PROD_POLICY_PATHS)
    );
    assert!(!t.exists("vh/generated/policies/app-two-api-local.hcl"));
    assert!(!t.exists("vh/generated/roles/app-two-api-local.json"));
}

#[test]
fn test_role_documents() {
    let t = Test::with_apps();

    let output = t.generate_policies(&[
        "--appname",
        "app-two-api",
        "--project-id",
        "15",
        "--dependent-apps",
        "app-two-client,shared-lib",
    ]);
    assert_success(&output);

    let dev = t.read("vh/generated/roles/app-two-api-dev.json");
    assert_eq!(
        dev,
        r#"{
 "role_type": "jwt",
 "policies": [
  "vh-app-two-api-dev",
  "vh-app-two-client-dev",
  "vh-shared-lib-dev"
 ],
 "token_explicit_max_ttl": 60,
 "user_claim": "user_email",
 "bound_claims_type": "glob",
 "bound_claims": {
  "project_id": "15"
 }
}
"#
    );

    let prod = t.read("vh/generated/roles/app-two-api-prod.json");
    assert!(prod.contains("\"ref\": \"master\""));
    assert!(prod.contains("\"ref_type\": \"branch\""));
}

#[test]
fn test_no_lock_prod_claims() {
    let t = Test::with_apps();

    let output = t.generate_policies(&[
        "--appname",
        "app-two-api",
        "--project-id",
        "15",
        "--no-lock-prod-claims",
    ]);
    assert_success(&output);

    let prod = t.read("vh/generated/roles/app-two-api-prod.json");
    assert!(!prod.contains("ref"));
}

#[test]
fn test_policy_prefix() {
    let t = Test::with_apps();

    let output = t.generate_policies(&[
        "--appname",
        "app-two-api",
        "--project-id",
        "15",
        "--policy-prefix",
        "ci",
    ]);
    assert_success(&output);
    assert!(t.read("vh/generated/roles/app-two-api-dev.json").contains("\"ci-app-two-api-dev\""));
}

#[test]
fn test_stale_output_removed() {
    let t = Test::with_apps();
    std::fs::create_dir_all(t.root().join("generated/roles")).unwrap();
    std::fs::write(t.root().join("generated/roles/old-app-dev.json"), "{}").unwrap();

    assert_success(&t.generate_policies(&["--appname", "app-two-api", "--project-id", "15"]));
    assert!(!t.exists("vh/generated/roles/old-app-dev.json"));
}

#[test]
fn test_regeneration_is_byte_identical() {
    let t = Test::with_apps();
    let args = ["--appname", "app-two-api", "--project-id", "15"];

    assert_success(&t.generate_policies(&args));
    let first = t.read("vh/generated/policies/app-two-api-prod.hcl");
    assert_success(&t.generate_policies(&args));
    assert_eq!(first, t.read("vh/generated/policies/app-two-api-prod.hcl"));
}

#[test]
fn test_settings_file_supplies_defaults() {
    let t = Test::with_apps();
    t.settings(
        r#"[vaultmap]
app_name = "app-two-api"
project_id = "42"
policy_prefix = "team"
"#,
    );

    assert_success(&t.generate_policies(&[]));
    let role = t.read("vh/generated/roles/app-two-api-dev.json");
    assert!(role.contains("\"project_id\": \"42\""));
    assert!(role.contains("\"team-app-two-api-dev\""));
}

#[test]
fn test_flags_override_settings_file() {
    let t = Test::with_apps();
    t.settings("[vaultmap]\napp_name = \"app-two-api\"\nproject_id = \"42\"\n");

    assert_success(&t.generate_policies(&["--project-id", "7"]));
    assert!(t
        .read("vh/generated/roles/app-two-api-dev.json")
        .contains("\"project_id\": \"7\""));
}

#[test]
fn test_unresolved_variable_is_reported() {
    let t = Test::with_apps();
    t.manifest(
        "app-two-client",
        "dev",
        "secret_name: app-two-client\nfull_secret_config_paths:\n  - secret/{{TEAM_NAME}}/client\n",
    );

    let output = t.generate_policies(&["--appname", "app-two-api", "--project-id", "15"]);
    assert_success(&output);
    assert_stderr_contains(&output, "unable to look up variable TEAM_NAME");
    assert!(t
        .read("vh/generated/policies/app-two-api-dev.hcl")
        .contains("path \"secret/data/+/client\""));
}

#[test]
fn test_missing_project_id() {
    let t = Test::with_apps();

    let output = t.generate_policies(&["--appname", "app-two-api"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required value: project-id");
}

#[test]
fn test_missing_env_in_one_app() {
    let t = Test::with_apps();
    t.manifest("app-two-api", "qa", "secret_name: app-two-api\n");

    let output = t.generate_policies(&["--appname", "app-two-api", "--project-id", "15"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "manifest not found for env 'qa'");
}

#[test]
fn test_apply_needs_vault_cli() {
    let t = Test::with_apps();

    let output = t.generate_policies(&["--appname", "app-two-api", "--project-id", "15", "--apply"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "vault CLI not found");
}

#[test]
fn test_vh_folder_flag() {
    let t = Test::new();
    t.manifest("solo", "dev", "secret_name: solo\nfull_secret_config_paths:\n  - kv/solo\n");
    std::fs::rename(t.root(), t.dir.path().join("maps")).unwrap();

    let output = t.generate_policies(&[
        "--vh-folder",
        "maps",
        "--appname",
        "solo",
        "--project-id",
        "1",
    ]);
    assert_success(&output);
    assert_eq!(
        t.read("maps/generated/policies/solo-dev.hcl"),
        policy_text(&["kv/data/solo"])
    );
}
