//! Create command - push resolved secrets to the cluster.

use tracing::debug;

use crate::cli::{output, Context};
use crate::core::cluster::Kubectl;
use crate::core::diagnostics::Diagnostics;
use crate::core::pull::{self, SecretNaming};
use crate::core::vars;
use crate::error::Result;

/// Arguments for `create`.
pub struct CreateArgs {
    pub env: String,
    pub verify: bool,
    pub secret_name_prefix: Option<String>,
    pub secret_name_suffix: Option<String>,
    pub namespace: Option<String>,
    pub kube_config: Option<String>,
}

/// Resolve every app for the environment and apply it as a cluster secret.
pub fn execute(ctx: &Context, args: CreateArgs) -> Result<()> {
    let apps = ctx.apps()?;
    let mut diag = Diagnostics::new();

    let resolved = pull::resolve_all(&apps, &args.env, &ctx.vault, &vars::process_env, &mut diag)?;
    debug!(apps = resolved.len(), "secret lookup successful");
    for warning in diag.take() {
        output::warn(&warning);
    }

    if args.verify {
        for entry in &resolved {
            output::kv(&entry.app, format!("{} keys", entry.secrets.values.len()));
        }
        output::success(&format!("verified {} apps for {}", resolved.len(), args.env));
        return Ok(());
    }

    let naming = SecretNaming {
        prefix: args
            .secret_name_prefix
            .or_else(|| ctx.settings.secret_name_prefix.clone()),
        suffix: args
            .secret_name_suffix
            .or_else(|| ctx.settings.secret_name_suffix.clone()),
    };
    let namespace = args.namespace.or_else(|| ctx.settings.namespace.clone());
    let cluster = Kubectl::new(args.kube_config, namespace);

    let names = pull::create_secrets(&resolved, &cluster, &naming)?;
    for name in &names {
        output::success(&format!("created or updated secret: {}", name));
    }
    Ok(())
}
