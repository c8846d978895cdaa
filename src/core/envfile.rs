//! Shell env file output.
//!
//! Writes resolved secrets as one `KEY="value"` line per variable, sorted by
//! key, optionally prefixed with `export`.

use std::collections::BTreeMap;
#[cfg(unix)]
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

/// File name for an application's env file: `<app>-<env>.env`.
pub fn file_name(app: &str, env: &str) -> String {
    format!("{}-{}.env", app, env)
}

/// Path of the env file for `app` in `dir`.
pub fn path_for(dir: &Path, app: &str, env: &str) -> PathBuf {
    dir.join(file_name(app, env))
}

/// Render the file contents.
pub fn render(values: &BTreeMap<String, String>, export: bool) -> String {
    let mut out = String::new();
    for (key, value) in values {
        if export {
            out.push_str("export ");
        }
        out.push_str(&format!("{}=\"{}\"\n", key, escape(value)));
    }
    out
}

/// Escape the characters a shell still interprets inside double quotes.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Write an env file, replacing any existing one. The file is owner-only on
/// Unix.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be written.
pub fn write(path: &Path, values: &BTreeMap<String, String>, export: bool) -> Result<()> {
    let content = render(values, export);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        // An existing file keeps its old mode through truncate.
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    info!(path = %path.display(), vars = values.len(), "env file written");
    Ok(())
}
