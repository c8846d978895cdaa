//! Test fixtures and constants.

/// Two applications, `app-two-api` (with a base file) and
/// `app-two-client`, as `(app, env, manifest)`.
pub const STANDARD_MANIFESTS: &[(&str, &str, &str)] = &[
    ("app-two-api", "base", API_BASE),
    ("app-two-api", "dev", API_DEV),
    ("app-two-api", "prod", API_PROD),
    ("app-two-api", "local", API_LOCAL),
    ("app-two-client", "dev", CLIENT_DEV),
    ("app-two-client", "prod", CLIENT_PROD),
];

pub const API_BASE: &str = r#"secret_name: app-two-api
key_config:
  GROUP_ID:
    path: config/machine/dep/base
    key: GROUP_ID
full_secret_config_paths:
  - secret/machine/config/shared
"#;

pub const API_DEV: &str = r#"secret_name: app-two-api
key_config:
  EXAMPLE_PASS:
    path: secret/machine/anotherdep/dev
    key: anotherdep-verification-token
full_secret_config_paths:
  - secret/machine/config/app-two-api-dev
"#;

pub const API_PROD: &str = r#"secret_name: app-two-api
key_config:
  EXAMPLE_PASS:
    path: secret/machine/anotherdep/prod
    key: anotherdep-verification-token
    base64: true
"#;

pub const API_LOCAL: &str = r#"secret_name: app-two-api
key_config:
  DB_PASS:
    path: users/{{DEV_NAME}}/db/somedb/dev
    key: password
"#;

pub const CLIENT_DEV: &str = r#"secret_name: app-two-client
key_config:
  ADMIN_USER:
    path: secret/machine/somedep/admin
    key: username
full_secret_config_paths:
  - secret/machine/config/app-two-client-dev
"#;

pub const CLIENT_PROD: &str = r#"secret_name: app-two-client
full_secret_config_paths:
  - secret/machine/config/app-two-client-prod
"#;

/// Normalized dev paths for the standard tree, sorted.
pub const DEV_POLICY_PATHS: &[&str] = &[
    "config/data/machine/dep/base",
    "secret/data/machine/anotherdep/dev",
    "secret/data/machine/config/app-two-api-dev",
    "secret/data/machine/config/app-two-client-dev",
    "secret/data/machine/config/shared",
    "secret/data/machine/somedep/admin",
];

/// Normalized prod paths for the standard tree, sorted.
///
/// `app-two-client` has no base file, so its prod manifest is layered over
/// its dev manifest.
pub const PROD_POLICY_PATHS: &[&str] = &[
    "config/data/machine/dep/base",
    "secret/data/machine/anotherdep/prod",
    "secret/data/machine/config/app-two-client-dev",
    "secret/data/machine/config/app-two-client-prod",
    "secret/data/machine/config/shared",
    "secret/data/machine/somedep/admin",
];
