//! Delete command.

use crate::cli::{output, Context};
use crate::core::generate;
use crate::error::{ConfigError, Result};

/// Remove the app's policy and role for every environment.
pub fn execute(ctx: &Context, appname: Option<String>, policy_prefix: Option<String>) -> Result<()> {
    let app_name = appname
        .or_else(|| ctx.settings.app_name.clone())
        .ok_or(ConfigError::MissingValue("appname"))?;
    let prefix = policy_prefix.unwrap_or_else(|| ctx.settings.policy_prefix_or_default());
    let apps = ctx.apps()?;

    let removed = generate::delete(&apps, &app_name, &prefix, &ctx.vault)?;
    for name in &removed {
        output::list_item(name);
    }
    output::success(&format!("deleted {} policies and roles from vault", removed.len()));
    Ok(())
}
