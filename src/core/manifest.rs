//! Secret manifests.
//!
//! A manifest declares what one application needs from the secret store in
//! one environment:
//!
//! ```yaml
//! secret_name: app-two-api
//! key_config:
//!   EXAMPLE_PASS:
//!     path: secret/machine/anotherdep/prod
//!     key: anotherdep-verification-token
//!     base64: true
//! full_secret_config_paths:
//!   - secret/machine/config/app-two-client-dev
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::diagnostics::Diagnostics;
use crate::core::vars::{self, Lookup};
use crate::error::{ConfigError, Result};

/// One scalar secret: a store path plus the field to take from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDefinition {
    pub path: String,
    pub key: String,
    /// Base64-encode the resolved value.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub base64: bool,
}

/// Output variable name to key definition.
pub type KeySet = BTreeMap<String, KeyDefinition>;

/// A parsed (or merged) manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub secret_name: String,
    #[serde(rename = "key_config", default, deserialize_with = "null_as_default")]
    pub keys: KeySet,
    /// Paths whose every field becomes an output variable. Later entries win.
    #[serde(
        rename = "full_secret_config_paths",
        default,
        deserialize_with = "null_as_default"
    )]
    pub full_paths: Vec<String>,
}

/// `key_config:` with nothing under it parses as null.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Manifest {
    /// Parse manifest text. `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Manifest` if the YAML is malformed.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| {
            ConfigError::Manifest {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    /// Read a manifest file, substituting `{{NAME}}` placeholders before
    /// parsing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Manifest`.
    pub fn load(path: &Path, lookup: Lookup<'_>, diag: &mut Diagnostics) -> Result<Self> {
        debug!(path = %path.display(), "loading manifest");
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let text = vars::resolve(&raw, lookup, diag);
        let manifest = Self::parse(&text, path)?;
        debug!(
            keys = manifest.keys.len(),
            full_paths = manifest.full_paths.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    /// Every logical path this manifest reads, key paths first.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.keys
            .values()
            .map(|def| def.path.as_str())
            .chain(self.full_paths.iter().map(String::as_str))
    }
}

/// Layer an environment manifest over an optional base.
///
/// The secret name comes from `env`. Full paths are the base's followed by
/// the environment's. Keys start as the base's set and the environment's
/// entries overwrite per name. Neither input is modified.
pub fn merge(base: Option<&Manifest>, env: &Manifest) -> Manifest {
    let Some(base) = base else {
        return env.clone();
    };

    let mut keys = base.keys.clone();
    for (name, def) in &env.keys {
        keys.insert(name.clone(), def.clone());
    }

    let mut full_paths = Vec::with_capacity(base.full_paths.len() + env.full_paths.len());
    full_paths.extend(base.full_paths.iter().cloned());
    full_paths.extend(env.full_paths.iter().cloned());

    Manifest {
        secret_name: env.secret_name.clone(),
        keys,
        full_paths,
    }
}
