//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a vaultmap command isolated from the caller's environment.
    ///
    /// Runs in the project directory with every variable vaultmap reads
    /// cleared, and `PATH` pointed at an empty directory so no real vault or
    /// kubectl is ever reached.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("vaultmap").expect("failed to find vaultmap binary");
        for var in [
            "VH_CONFIG_DIR",
            "VH_ENV",
            "VAULT_ADDR",
            "VAULT_TOKEN",
            "KUBECONFIG",
            "KUBE_NAMESPACE",
            "VAULTMAP_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.env("PATH", self.dir.path().join("no-tools"));
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `vaultmap generate-policies`.
    pub fn generate_policies(&self, extra: &[&str]) -> Output {
        self.cmd()
            .arg("generate-policies")
            .args(extra)
            .output()
            .expect("failed to run vaultmap generate-policies")
    }

    /// Shortcut for `vaultmap generate-env-file`.
    pub fn generate_env_file(&self, extra: &[&str]) -> Output {
        self.cmd()
            .arg("generate-env-file")
            .args(extra)
            .output()
            .expect("failed to run vaultmap generate-env-file")
    }

    /// Shortcut for `vaultmap create`.
    pub fn create(&self, extra: &[&str]) -> Output {
        self.cmd()
            .arg("create")
            .args(extra)
            .output()
            .expect("failed to run vaultmap create")
    }

    /// Shortcut for `vaultmap delete`.
    pub fn delete(&self, extra: &[&str]) -> Output {
        self.cmd()
            .arg("delete")
            .args(extra)
            .output()
            .expect("failed to run vaultmap delete")
    }
}
