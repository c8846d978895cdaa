//! Generate-policies command.

use crate::cli::{output, Context};
use crate::core::config::split_list;
use crate::core::diagnostics::Diagnostics;
use crate::core::generate::{self, GenerateOptions};
use crate::core::store::PolicyStore;
use crate::core::vars;
use crate::error::{ConfigError, Result};

/// Arguments for `generate-policies`.
pub struct PolicyArgs {
    pub appname: Option<String>,
    pub project_id: Option<String>,
    pub policy_prefix: Option<String>,
    pub dependent_apps: Option<String>,
    pub no_lock_prod_claims: bool,
    pub apply: bool,
}

impl PolicyArgs {
    /// Fill gaps from `.vaultmap.toml`.
    fn into_options(self, ctx: &Context) -> Result<GenerateOptions> {
        let settings = &ctx.settings;
        let app_name = self
            .appname
            .or_else(|| settings.app_name.clone())
            .ok_or(ConfigError::MissingValue("appname"))?;
        let project_id = self
            .project_id
            .or_else(|| settings.project_id.clone())
            .ok_or(ConfigError::MissingValue("project-id"))?;
        let dependent_apps = match self.dependent_apps {
            Some(raw) => split_list(&raw),
            None => settings.dependent_apps.clone(),
        };

        Ok(GenerateOptions {
            app_name,
            project_id,
            policy_prefix: self
                .policy_prefix
                .unwrap_or_else(|| settings.policy_prefix_or_default()),
            lock_prod_claims: !self.no_lock_prod_claims && settings.lock_prod_claims_or_default(),
            dependent_apps,
        })
    }
}

/// Generate (and optionally apply) policies and roles.
pub fn execute(ctx: &Context, args: PolicyArgs) -> Result<()> {
    let apply = args.apply;
    let opts = args.into_options(ctx)?;
    let apps = ctx.apps()?;
    let mut diag = Diagnostics::new();

    let store = apply.then_some(&ctx.vault as &dyn PolicyStore);
    let report = generate::generate(
        &ctx.root,
        &apps,
        &opts,
        store,
        &vars::process_env,
        &mut diag,
    )?;

    output::section(&format!("Policies for {}", opts.app_name));
    for artifact in &report.artifacts {
        output::kv(&artifact.env, &artifact.name);
        output::list_item(&output::path(artifact.policy_path.display()));
        output::list_item(&output::path(artifact.role_path.display()));
    }
    if report.artifacts.is_empty() {
        output::dimmed("no environments found");
    }
    for warning in diag.take() {
        output::warn(&warning);
    }
    if report.applied {
        output::success(&format!("applied {} policies and roles", report.artifacts.len()));
    }
    Ok(())
}
