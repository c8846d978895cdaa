//! Application manifest directories.
//!
//! The manifest root holds one directory per application; each directory
//! holds one `<env>.yaml` per environment and optionally a shared
//! `base.yaml`:
//!
//! ```text
//! vh/
//! ├── app-two-api/
//! │   ├── base.yaml
//! │   ├── dev.yaml
//! │   └── prod.yaml
//! └── generated/        # output, never an application
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants::{BASE_MANIFEST, DEFAULT_ENV, GENERATED_DIR, MANIFEST_EXT};
use crate::core::diagnostics::Diagnostics;
use crate::core::manifest::{self, Manifest};
use crate::core::vars::Lookup;
use crate::error::{ConfigError, Result};

/// One application's manifest directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    name: String,
    dir: PathBuf,
}

impl App {
    /// Application at `root/name`.
    pub fn new(root: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            dir: root.join(name),
        }
    }

    /// Find every application under `root`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRoot` if `root` is not a directory.
    pub fn discover(root: &Path) -> Result<Vec<Self>> {
        if !root.is_dir() {
            return Err(ConfigError::MissingRoot(root.to_path_buf()).into());
        }

        let mut apps = Vec::new();
        for entry in std::fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name == GENERATED_DIR {
                continue;
            }
            debug!(app = %name, "found application");
            apps.push(Self::new(root, &name));
        }
        apps.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(apps)
    }

    /// Application name (its directory name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding this application's manifests.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the manifest for `env` (whether or not it exists).
    pub fn manifest_path(&self, env: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", env, MANIFEST_EXT))
    }

    /// Whether a manifest exists for `env`.
    pub fn has_env(&self, env: &str) -> bool {
        self.manifest_path(env).is_file()
    }

    /// Environments declared by this application, sorted.
    ///
    /// Every `*.yaml` file except `base.yaml` names an environment.
    pub fn environments(&self) -> Result<Vec<String>> {
        let mut envs = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(MANIFEST_EXT)
            {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem != BASE_MANIFEST {
                envs.push(stem.to_string());
            }
        }
        envs.sort();
        Ok(envs)
    }

    /// The manifest that acts as base when loading `env`.
    ///
    /// `base.yaml` if present; otherwise the default environment's manifest
    /// when a different environment is requested.
    fn base_path(&self, env: &str) -> Option<PathBuf> {
        let base = self.manifest_path(BASE_MANIFEST);
        if base.is_file() {
            return Some(base);
        }
        if env != DEFAULT_ENV && self.has_env(DEFAULT_ENV) {
            return Some(self.manifest_path(DEFAULT_ENV));
        }
        None
    }

    /// Load the merged manifest for `env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingManifest` when neither the environment
    /// manifest nor any base exists, or a parse error from either file.
    pub fn load(&self, env: &str, lookup: Lookup<'_>, diag: &mut Diagnostics) -> Result<Manifest> {
        let base_path = self.base_path(env);
        let env_path = self.manifest_path(env);

        if !env_path.is_file() {
            let Some(base_path) = base_path else {
                return Err(ConfigError::MissingManifest {
                    dir: self.dir.clone(),
                    env: env.to_string(),
                }
                .into());
            };
            diag.warn(format!(
                "could not find {} env for {}, falling back to {}",
                env,
                self.name,
                base_path.display()
            ));
            return Manifest::load(&base_path, lookup, diag);
        }

        let env_manifest = Manifest::load(&env_path, lookup, diag)?;
        match base_path {
            Some(base_path) => {
                debug!(app = %self.name, env, base = %base_path.display(), "merging manifests");
                let base = Manifest::load(&base_path, lookup, diag)?;
                Ok(manifest::merge(Some(&base), &env_manifest))
            }
            None => {
                if env != DEFAULT_ENV {
                    diag.warn(format!(
                        "no base manifest for {}, using {} only",
                        self.name,
                        env_path.display()
                    ));
                }
                Ok(manifest::merge(None, &env_manifest))
            }
        }
    }
}
