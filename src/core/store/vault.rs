//! Vault store backend.
//!
//! Talks to Vault through the `vault` CLI, which takes care of auth helpers,
//! TLS and retries. `VAULT_ADDR` and `VAULT_TOKEN` are passed through when
//! configured; otherwise the CLI's own environment and token helper apply.
//!
//! ## Requirements
//!
//! - `vault` CLI must be installed and on `PATH`
//! - The token must be able to read every secret path (or manage
//!   `sys/policy` and `auth/jwt/role` when applying)

use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde::Deserialize;
use tracing::{debug, trace};

use super::{FieldMap, PolicyStore, SecretStore};
use crate::core::constants::ROLE_MOUNT;
use crate::error::{Result, StoreError};

/// Marker the CLI prints when a path holds nothing.
const NOT_FOUND: &str = "No value found at";

/// `vault read -format=json` response envelope.
#[derive(Debug, Deserialize)]
struct ReadResponse {
    #[serde(default)]
    data: Option<FieldMap>,
    #[serde(default)]
    warnings: Option<Vec<String>>,
}

/// Vault accessed through its CLI.
#[derive(Debug, Clone, Default)]
pub struct VaultCli {
    address: Option<String>,
    token: Option<String>,
}

impl VaultCli {
    /// Create a backend; empty values fall back to the CLI's environment.
    pub fn new(address: Option<String>, token: Option<String>) -> Self {
        Self {
            address: address.filter(|a| !a.is_empty()),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn command(&self, args: &[&str]) -> Result<Command> {
        let bin = which::which("vault").map_err(|_| StoreError::ToolMissing)?;
        let mut cmd = Command::new(bin);
        cmd.args(args);
        if let Some(address) = &self.address {
            cmd.env("VAULT_ADDR", address);
        }
        if let Some(token) = &self.token {
            cmd.env("VAULT_TOKEN", token);
        }
        Ok(cmd)
    }

    /// Run the CLI, optionally feeding `stdin`.
    fn run(&self, args: &[&str], stdin: Option<&str>) -> Result<Output> {
        trace!(?args, "running vault");
        let mut child = self
            .command(args)?
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StoreError::Command(format!("failed to spawn vault: {}", e)))?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes())
                .map_err(|e| StoreError::Command(format!("failed to write to vault: {}", e)))?;
        }

        child
            .wait_with_output()
            .map_err(|e| StoreError::Command(format!("vault command failed: {}", e)).into())
    }

    /// Run the CLI and require success.
    fn run_ok(&self, args: &[&str], stdin: Option<&str>) -> Result<()> {
        let output = self.run(args, stdin)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoreError::Command(format!(
                "vault {} failed: {}",
                args.join(" "),
                stderr.trim()
            ))
            .into());
        }
        Ok(())
    }
}

impl SecretStore for VaultCli {
    fn read(&self, path: &str) -> Result<Option<FieldMap>> {
        debug!(path, "looking up secret");
        let output = self.run(&["read", "-format=json", path], None)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains(NOT_FOUND) {
                return Ok(None);
            }
            return Err(StoreError::Command(format!(
                "unable to read {}: {}",
                path,
                stderr.trim()
            ))
            .into());
        }

        let response: ReadResponse = serde_json::from_slice(&output.stdout)?;
        if let Some(warning) = response.warnings.and_then(|w| w.into_iter().next()) {
            return Err(StoreError::Warning {
                path: path.to_string(),
                warning,
            }
            .into());
        }
        Ok(response.data)
    }
}

impl PolicyStore for VaultCli {
    fn put_policy(&self, name: &str, policy: &str) -> Result<()> {
        self.run_ok(&["policy", "write", name, "-"], Some(policy))?;
        debug!(name, "policy written");
        Ok(())
    }

    fn delete_policy(&self, name: &str) -> Result<()> {
        self.run_ok(&["policy", "delete", name], None)?;
        debug!(name, "policy deleted");
        Ok(())
    }

    fn put_role(&self, name: &str, role: &str) -> Result<()> {
        let path = format!("{}/{}", ROLE_MOUNT, name);
        self.run_ok(&["write", &path, "-"], Some(role))?;
        debug!(name, "role written");
        Ok(())
    }

    fn delete_role(&self, name: &str) -> Result<()> {
        let path = format!("{}/{}", ROLE_MOUNT, name);
        self.run_ok(&["delete", &path], None)?;
        debug!(name, "role deleted");
        Ok(())
    }
}
