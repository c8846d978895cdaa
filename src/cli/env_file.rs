//! Generate-env-file command.

use std::path::Path;

use crate::cli::{output, Context};
use crate::core::diagnostics::Diagnostics;
use crate::core::{pull, vars};
use crate::error::Result;

/// Write `<dir>/<app>-<env>.env` for every app.
pub fn execute(ctx: &Context, env: &str, dir: &Path, remove_export: bool) -> Result<()> {
    let apps = ctx.apps()?;
    let mut diag = Diagnostics::new();

    let resolved = pull::resolve_all(&apps, env, &ctx.vault, &vars::process_env, &mut diag)?;
    for warning in diag.take() {
        output::warn(&warning);
    }
    let written = pull::write_env_files(dir, env, &resolved, !remove_export)?;

    for path in &written {
        output::success(&format!("created/updated env file: {}", output::path(path.display())));
    }
    Ok(())
}
