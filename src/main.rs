//! Vaultmap - resolve secret manifests against Vault.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vaultmap::cli::output;
use vaultmap::cli::{execute, Cli};
use vaultmap::error::{ClusterError, ConfigError, Error, StoreError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("VAULTMAP_LOG").unwrap_or_else(|_| {
        if cli.global.verbose {
            EnvFilter::new("vaultmap=debug")
        } else {
            EnvFilter::new("vaultmap=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command, cli.global) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingRoot(_)) => {
                Some("set --vh-folder or VH_CONFIG_DIR to your manifest folder")
            }
            Error::Config(ConfigError::MissingManifest { .. }) => {
                Some("every app needs <env>.yaml or a base.yaml")
            }
            Error::Config(ConfigError::MissingValue(_)) => {
                Some("pass the flag or set it in .vaultmap.toml")
            }
            Error::Store(StoreError::ToolMissing) => {
                Some("install the vault CLI: https://developer.hashicorp.com/vault/install")
            }
            Error::Cluster(ClusterError::ToolMissing) => {
                Some("install kubectl: https://kubernetes.io/docs/tasks/tools/")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
