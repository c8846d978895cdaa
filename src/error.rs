//! Error types for vaultmap.
//!
//! Each layer gets its own category enum; everything converts into the
//! top-level [`Error`] so callers can propagate with `?` and still match on
//! the precise failure.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Manifest and settings problems. Always fatal for the run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("manifest not found for env '{env}' in {}", dir.display())]
    MissingManifest { dir: PathBuf, env: String },

    #[error("manifest root not found: {}", .0.display())]
    MissingRoot(PathBuf),

    #[error("missing required value: {0}")]
    MissingValue(&'static str),

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),
}

/// Secret store failures.
///
/// `PathNotFound`, `KeyNotFound` and `Decode` are kept apart so callers can
/// tell a missing secret from a missing field from a malformed response.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secret {path} returned nil - make sure the secret exists in vault")]
    PathNotFound { path: String },

    #[error("key {key} returned nil for secret {path} - make sure the key exists in vault")]
    KeyNotFound { key: String, path: String },

    #[error("could not decode versioned secret at {path}")]
    Decode { path: String },

    #[error("got warning looking up secret {path}: {warning}")]
    Warning { path: String, warning: String },

    #[error("vault CLI not found on PATH")]
    ToolMissing,

    #[error("{0}")]
    Command(String),
}

/// Cluster secret write failures.
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("kubectl not found on PATH")]
    ToolMissing,

    #[error("unable to apply secret {name}: {reason}")]
    Apply { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
