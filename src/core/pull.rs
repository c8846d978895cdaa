//! Secret pulls for every application.
//!
//! Resolves each application's manifest for one environment, then hands the
//! results to an env file writer or the cluster. Every application is
//! resolved before anything is written, so a failed read leaves no partial
//! output behind.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::app::App;
use crate::core::cluster::ClusterSecrets;
use crate::core::diagnostics::Diagnostics;
use crate::core::envfile;
use crate::core::resolver::{self, ResolvedSecrets};
use crate::core::store::SecretStore;
use crate::core::vars::Lookup;
use crate::error::Result;

/// Resolved secrets for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSecrets {
    pub app: String,
    pub secrets: ResolvedSecrets,
}

/// Resolve every application for `env`.
///
/// # Errors
///
/// Returns the first manifest or store error.
pub fn resolve_all(
    apps: &[App],
    env: &str,
    store: &dyn SecretStore,
    lookup: Lookup<'_>,
    diag: &mut Diagnostics,
) -> Result<Vec<AppSecrets>> {
    let mut out = Vec::with_capacity(apps.len());
    for app in apps {
        debug!(app = app.name(), env, "resolving secrets");
        let manifest = app.load(env, lookup, diag)?;
        let secrets = resolver::resolve(&manifest, store, lookup, diag)?;
        out.push(AppSecrets {
            app: app.name().to_string(),
            secrets,
        });
    }
    Ok(out)
}

/// Write one env file per application into `dir`. Returns the paths
/// written.
pub fn write_env_files(
    dir: &Path,
    env: &str,
    resolved: &[AppSecrets],
    export: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(resolved.len());
    for entry in resolved {
        let path = envfile::path_for(dir, &entry.app, env);
        envfile::write(&path, &entry.secrets.values, export)?;
        written.push(path);
    }
    Ok(written)
}

/// Name affixes for cluster secrets.
#[derive(Debug, Clone, Default)]
pub struct SecretNaming {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

/// Apply every application's secrets to the cluster. Returns the secret
/// names in application order.
pub fn create_secrets(
    resolved: &[AppSecrets],
    cluster: &dyn ClusterSecrets,
    naming: &SecretNaming,
) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(resolved.len());
    for entry in resolved {
        let name = entry
            .secrets
            .decorated_name(naming.prefix.as_deref(), naming.suffix.as_deref());
        cluster.apply_secret(&name, &entry.secrets.values)?;
        info!(app = %entry.app, secret = %name, "created or updated secret");
        names.push(name);
    }
    Ok(names)
}
