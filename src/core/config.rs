//! Project settings.
//!
//! Reads optional defaults from `.vaultmap.toml`:
//!
//! ```toml
//! [vaultmap]
//! root = "vh"
//! app_name = "testapp"
//! project_id = "15"
//! policy_prefix = "vh"
//! lock_prod_claims = true
//! dependent_apps = ["app-two-api", "app-two-client"]
//! ```
//!
//! Command-line flags and environment variables override these values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Contents of `.vaultmap.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vaultmap: Settings,
}

/// Defaults for the commands. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Manifest root directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Primary application name used for policy and role names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    /// CI project id bound into roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_prefix: Option<String>,
    /// Lock production-tier roles to the release branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_prod_claims: Option<bool>,
    /// Extra applications whose policies the role also grants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependent_apps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name_suffix: Option<String>,
    /// Cluster namespace for created secrets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Config {
    /// Path to the settings file in `dir`.
    pub fn config_path(dir: &Path) -> PathBuf {
        dir.join(constants::CONFIG_FILE)
    }

    /// Load settings from `dir`, or defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Settings` if the file
    /// exists but cannot be read or parsed.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = Self::config_path(dir);
        if !path.exists() {
            debug!(path = %path.display(), "no settings file");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading settings");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Settings)?;
        Ok(config)
    }

    /// Load settings from the current directory.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }
}

impl Settings {
    /// Manifest root, falling back to `vh`.
    pub fn root_or_default(&self) -> PathBuf {
        self.root
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_ROOT))
    }

    /// Policy prefix, falling back to `vh`.
    pub fn policy_prefix_or_default(&self) -> String {
        self.policy_prefix
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_POLICY_PREFIX.to_string())
    }

    /// Claim locking, on unless disabled.
    pub fn lock_prod_claims_or_default(&self) -> bool {
        self.lock_prod_claims.unwrap_or(true)
    }
}

/// Split a comma separated application list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
