//! Test support utilities for vaultmap integration tests.
//!
//! Provides a temporary manifest tree and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment with an isolated project directory.
///
/// Manifests live under `<dir>/vh`. Child processes run with
/// `.current_dir()` so tests can run in parallel.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    /// Create an empty project.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Project with the standard two-app manifest tree.
    pub fn with_apps() -> Self {
        let t = Self::new();
        for (app, env, body) in STANDARD_MANIFESTS {
            t.manifest(app, env, body);
        }
        t
    }

    /// Manifest root.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("vh")
    }

    /// Write `vh/<app>/<env>.yaml`.
    pub fn manifest(&self, app: &str, env: &str, body: &str) {
        let dir = self.root().join(app);
        fs::create_dir_all(&dir).expect("failed to create app dir");
        fs::write(dir.join(format!("{}.yaml", env)), body).expect("failed to write manifest");
    }

    /// Write `.vaultmap.toml` in the project directory.
    pub fn settings(&self, body: &str) {
        fs::write(self.dir.path().join(".vaultmap.toml"), body).expect("failed to write settings");
    }

    /// Read a file relative to the project directory.
    pub fn read(&self, rel: impl AsRef<Path>) -> String {
        let path = self.dir.path().join(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
    }

    /// Whether a file exists relative to the project directory.
    pub fn exists(&self, rel: impl AsRef<Path>) -> bool {
        self.dir.path().join(rel).exists()
    }
}
