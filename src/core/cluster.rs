//! Cluster secret output.
//!
//! Resolved secrets land in the cluster as `Opaque` secrets. The
//! [`Kubectl`] backend pipes a `Secret` manifest to `kubectl apply -f -`,
//! which creates the secret or updates it in place.

use std::collections::BTreeMap;
use std::io::Write;
use std::process::{Command, Stdio};

use base64::Engine;
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::error::{ClusterError, Result};

/// Write access to cluster secrets.
pub trait ClusterSecrets {
    /// Create or replace the secret `name` holding `values`.
    fn apply_secret(&self, name: &str, values: &BTreeMap<String, String>) -> Result<()>;
}

/// Build the `Secret` manifest for `values`. Data values are base64 encoded.
pub fn secret_manifest(
    name: &str,
    namespace: Option<&str>,
    values: &BTreeMap<String, String>,
) -> Value {
    let data: serde_json::Map<String, Value> = values
        .iter()
        .map(|(k, v)| {
            let encoded = base64::engine::general_purpose::STANDARD.encode(v.as_bytes());
            (k.clone(), Value::String(encoded))
        })
        .collect();

    let mut metadata = json!({ "name": name });
    if let Some(namespace) = namespace {
        metadata["namespace"] = Value::String(namespace.to_string());
    }

    json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "type": "Opaque",
        "metadata": metadata,
        "data": data,
    })
}

/// Cluster reached through `kubectl`.
#[derive(Debug, Clone, Default)]
pub struct Kubectl {
    kubeconfig: Option<String>,
    namespace: Option<String>,
}

impl Kubectl {
    /// Create a backend; empty values fall back to kubectl's own defaults.
    pub fn new(kubeconfig: Option<String>, namespace: Option<String>) -> Self {
        Self {
            kubeconfig: kubeconfig.filter(|k| !k.is_empty()),
            namespace: namespace.filter(|n| !n.is_empty()),
        }
    }

    fn command(&self) -> Result<Command> {
        let bin = which::which("kubectl").map_err(|_| ClusterError::ToolMissing)?;
        let mut cmd = Command::new(bin);
        if let Some(kubeconfig) = &self.kubeconfig {
            cmd.arg("--kubeconfig").arg(kubeconfig);
        }
        if let Some(namespace) = &self.namespace {
            cmd.arg("--namespace").arg(namespace);
        }
        Ok(cmd)
    }
}

impl ClusterSecrets for Kubectl {
    fn apply_secret(&self, name: &str, values: &BTreeMap<String, String>) -> Result<()> {
        let manifest = secret_manifest(name, self.namespace.as_deref(), values);
        let body = serde_json::to_vec(&manifest)?;
        let failed = |reason: String| ClusterError::Apply {
            name: name.to_string(),
            reason,
        };

        trace!(name, "running kubectl apply");
        let mut child = self
            .command()?
            .args(["apply", "-f", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("failed to spawn kubectl: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&body)
                .map_err(|e| failed(format!("failed to write to kubectl: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| failed(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(stderr.trim().to_string()).into());
        }

        debug!(name, keys = values.len(), "secret applied");
        Ok(())
    }
}
