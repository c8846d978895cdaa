//! Constants used throughout vaultmap.
//!
//! Centralizes magic strings and configuration values.

/// Project settings file name (.vaultmap.toml).
pub const CONFIG_FILE: &str = ".vaultmap.toml";

/// Default manifest root directory.
pub const DEFAULT_ROOT: &str = "vh";

/// Extension of manifest files.
pub const MANIFEST_EXT: &str = "yaml";

/// Stem of the shared base manifest (base.yaml).
pub const BASE_MANIFEST: &str = "base";

/// Environment whose manifest doubles as base when no base.yaml exists.
pub const DEFAULT_ENV: &str = "dev";

/// Environment that never gets compiled policies or roles.
pub const LOCAL_ENV: &str = "local";

/// Output directory (under the manifest root) for generated artifacts.
pub const GENERATED_DIR: &str = "generated";

/// Generated policy subdirectory.
pub const POLICIES_DIR: &str = "policies";

/// Generated role subdirectory.
pub const ROLES_DIR: &str = "roles";

/// Generated policy file extension.
pub const POLICY_EXT: &str = "hcl";

/// Generated role file extension.
pub const ROLE_EXT: &str = "json";

/// Segment inserted after the mount by the versioned kv engine.
pub const DATA_SEGMENT: &str = "data";

/// Substituted for `{{NAME}}` placeholders that could not be looked up.
pub const UNRESOLVED: &str = "ENV_VAR_NOT_FOUND";

/// Single-segment glob used in policies in place of unresolved segments.
pub const POLICY_WILDCARD: &str = "+";

/// Capability granted on every policy path.
pub const READ_CAPABILITY: &str = "read";

/// Default prefix for policy and role names.
pub const DEFAULT_POLICY_PREFIX: &str = "vh";

/// Role constants.
pub const ROLE_TYPE: &str = "jwt";
pub const ROLE_MAX_TTL_SECONDS: u64 = 60;
pub const ROLE_USER_CLAIM: &str = "user_email";
pub const ROLE_CLAIMS_TYPE: &str = "glob";
pub const LOCKED_REF: &str = "master";
pub const LOCKED_REF_TYPE: &str = "branch";

/// Mount path of the jwt auth roles.
pub const ROLE_MOUNT: &str = "auth/jwt/role";

/// Environments whose roles are claim-locked to the release branch.
pub const PRODUCTION_ENVS: &[&str] = &["prod", "qa"];
