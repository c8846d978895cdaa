//! Policy and role generation.
//!
//! For every environment declared by any application (except `local`),
//! compiles one read policy covering all applications and one jwt role for
//! the primary application, then writes them under the manifest root:
//!
//! ```text
//! vh/generated/
//! ├── policies/<app>-<env>.hcl
//! └── roles/<app>-<env>.json
//! ```
//!
//! The `generated` directory is removed and recreated at the start of each
//! run so no artifact from an earlier run survives.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::app::App;
use crate::core::constants::{
    GENERATED_DIR, LOCAL_ENV, POLICIES_DIR, POLICY_EXT, ROLES_DIR, ROLE_EXT,
};
use crate::core::diagnostics::Diagnostics;
use crate::core::policy::PolicyDocument;
use crate::core::role::{self, RoleDocument};
use crate::core::store::PolicyStore;
use crate::core::vars::Lookup;
use crate::error::{ConfigError, Result};

/// Inputs for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Primary application; names the policy, the role and the files.
    pub app_name: String,
    pub project_id: String,
    pub policy_prefix: String,
    pub lock_prod_claims: bool,
    /// Applications whose policies the role also grants, in this order.
    pub dependent_apps: Vec<String>,
}

/// Files written for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub env: String,
    /// Policy and role name in the store.
    pub name: String,
    pub policy_path: PathBuf,
    pub role_path: PathBuf,
    /// Number of path blocks in the policy.
    pub paths: usize,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub artifacts: Vec<Artifact>,
    pub applied: bool,
}

/// Store name for `app` in `env`: `<prefix>-<app>-<env>`.
pub fn policy_name(prefix: &str, app: &str, env: &str) -> String {
    format!("{}-{}-{}", prefix, app, env)
}

/// Sorted union of the environments declared by `apps`.
pub fn environments(apps: &[App]) -> Result<Vec<String>> {
    let mut envs = BTreeSet::new();
    for app in apps {
        envs.extend(app.environments()?);
    }
    Ok(envs.into_iter().collect())
}

/// Policy names granted by the role for `env`: the primary application's
/// first, then each dependent application's in the order given.
pub fn role_policies(opts: &GenerateOptions, env: &str) -> Vec<String> {
    std::iter::once(opts.app_name.as_str())
        .chain(opts.dependent_apps.iter().map(String::as_str))
        .map(|app| policy_name(&opts.policy_prefix, app, env))
        .collect()
}

/// Output directory for generated artifacts.
pub fn generated_dir(root: &Path) -> PathBuf {
    root.join(GENERATED_DIR)
}

/// Remove any previous output and recreate the empty layout.
fn reset_output(root: &Path) -> Result<(PathBuf, PathBuf)> {
    let generated = generated_dir(root);
    if generated.exists() {
        debug!(path = %generated.display(), "clearing generated output");
        fs::remove_dir_all(&generated)?;
    }
    let policies = generated.join(POLICIES_DIR);
    let roles = generated.join(ROLES_DIR);
    fs::create_dir_all(&policies)?;
    fs::create_dir_all(&roles)?;
    Ok((policies, roles))
}

/// Compile the policy for `env` across every application.
///
/// # Errors
///
/// Returns `ConfigError::MissingManifest` if any application lacks the
/// environment's manifest.
pub fn compile_policy(
    apps: &[App],
    env: &str,
    lookup: Lookup<'_>,
    diag: &mut Diagnostics,
) -> Result<PolicyDocument> {
    let mut manifests = Vec::with_capacity(apps.len());
    for app in apps {
        if !app.has_env(env) {
            return Err(ConfigError::MissingManifest {
                dir: app.dir().to_path_buf(),
                env: env.to_string(),
            }
            .into());
        }
        manifests.push(app.load(env, lookup, diag)?);
    }
    Ok(PolicyDocument::compile(&manifests))
}

/// Generate policies and roles for every environment, uploading them when
/// `store` is given.
///
/// Stops at the first error; files already written for earlier
/// environments are left in place.
///
/// # Errors
///
/// Returns configuration errors from manifest loading, `Error::Io` for
/// output failures, and store errors when applying.
pub fn generate(
    root: &Path,
    apps: &[App],
    opts: &GenerateOptions,
    store: Option<&dyn PolicyStore>,
    lookup: Lookup<'_>,
    diag: &mut Diagnostics,
) -> Result<GenerateReport> {
    let (policy_dir, role_dir) = reset_output(root)?;
    let envs = environments(apps)?;
    debug!(?envs, apps = apps.len(), "generating policies");

    let mut report = GenerateReport {
        artifacts: Vec::new(),
        applied: store.is_some(),
    };

    for env in &envs {
        if env == LOCAL_ENV {
            debug!("skipping local environment");
            continue;
        }

        let policy = compile_policy(apps, env, lookup, diag)?;
        let policy_text = policy.render();
        let policy_path = policy_dir.join(format!("{}-{}.{}", opts.app_name, env, POLICY_EXT));
        fs::write(&policy_path, &policy_text)?;

        let role = RoleDocument::compile(
            role_policies(opts, env),
            role::is_production_tier(env),
            &opts.project_id,
            opts.lock_prod_claims,
        );
        let role_text = role.render()?;
        let role_path = role_dir.join(format!("{}-{}.{}", opts.app_name, env, ROLE_EXT));
        fs::write(&role_path, &role_text)?;

        let name = policy_name(&opts.policy_prefix, &opts.app_name, env);
        if let Some(store) = store {
            store.put_policy(&name, &policy_text)?;
            store.put_role(&name, &role_text)?;
            info!(name = %name, "applied policy and role");
        }

        info!(env = %env, paths = policy.len(), "generated policy and role");
        report.artifacts.push(Artifact {
            env: env.clone(),
            name,
            policy_path,
            role_path,
            paths: policy.len(),
        });
    }

    Ok(report)
}

/// Remove the primary application's policy and role for every environment.
///
/// Returns the names removed.
///
/// # Errors
///
/// Returns the first store error.
pub fn delete(
    apps: &[App],
    app_name: &str,
    policy_prefix: &str,
    store: &dyn PolicyStore,
) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    for env in environments(apps)? {
        if env == LOCAL_ENV {
            continue;
        }
        let name = policy_name(policy_prefix, app_name, &env);
        store.delete_policy(&name)?;
        store.delete_role(&name)?;
        debug!(name = %name, "deleted policy and role");
        removed.push(name);
    }
    Ok(removed)
}
