//! Command-line interface.

pub mod create;
pub mod delete;
pub mod env_file;
pub mod output;
pub mod policies;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::app::App;
use crate::core::config::{Config, Settings};
use crate::core::store::VaultCli;
use crate::error::Result;

/// Vaultmap - resolve secret manifests into env files, cluster secrets and
/// Vault policies.
#[derive(Parser)]
#[command(
    name = "vaultmap",
    about = "Resolve secret manifests into env files, cluster secrets and Vault policies",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Folder of secret manifests [default: vh]
    #[arg(long, global = true, env = "VH_CONFIG_DIR")]
    pub vh_folder: Option<PathBuf>,

    /// Vault address
    #[arg(long, global = true, env = "VAULT_ADDR")]
    pub vault_url: Option<String>,

    /// Vault token
    #[arg(long, global = true, env = "VAULT_TOKEN", hide_env_values = true)]
    pub vault_token: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve secrets and create or update them as cluster secrets
    Create {
        /// Environment to resolve (the `<env>.yaml` file of each app)
        #[arg(long, env = "VH_ENV")]
        env: String,
        /// Only check that every secret resolves; write nothing
        #[arg(long)]
        verify: bool,
        /// Prefix for the cluster secret names
        #[arg(long)]
        secret_name_prefix: Option<String>,
        /// Suffix for the cluster secret names
        #[arg(long)]
        secret_name_suffix: Option<String>,
        /// Namespace for the cluster secrets
        #[arg(long, env = "KUBE_NAMESPACE")]
        namespace: Option<String>,
        /// kubectl config file
        #[arg(long, env = "KUBECONFIG")]
        kube_config: Option<String>,
    },

    /// Resolve secrets and write one env file per app
    GenerateEnvFile {
        /// Environment to resolve
        #[arg(long, env = "VH_ENV")]
        env: String,
        /// Directory for the env files
        #[arg(long, default_value = ".")]
        env_file_dir: PathBuf,
        /// Write `KEY="value"` lines without `export`
        #[arg(long)]
        remove_export: bool,
    },

    /// Generate read policies and jwt roles for every environment
    GeneratePolicies {
        /// Primary application name
        #[arg(long)]
        appname: Option<String>,
        /// CI project id bound into the roles
        #[arg(long)]
        project_id: Option<String>,
        /// Prefix for policy and role names [default: vh]
        #[arg(long)]
        policy_prefix: Option<String>,
        /// Comma separated apps whose policies the roles also grant
        #[arg(long)]
        dependent_apps: Option<String>,
        /// Do not lock prod and qa roles to the master branch
        #[arg(long)]
        no_lock_prod_claims: bool,
        /// Upload the generated policies and roles to Vault
        #[arg(long)]
        apply: bool,
    },

    /// Delete an app's policies and roles from Vault
    Delete {
        /// Primary application name
        #[arg(long)]
        appname: Option<String>,
        /// Prefix for policy and role names [default: vh]
        #[arg(long)]
        policy_prefix: Option<String>,
    },
}

/// Settings resolved once per invocation.
pub struct Context {
    pub root: PathBuf,
    pub settings: Settings,
    pub vault: VaultCli,
}

impl Context {
    /// Merge flags over `.vaultmap.toml` over defaults.
    pub fn load(global: GlobalArgs) -> Result<Self> {
        let settings = Config::load()?.vaultmap;
        let root = global
            .vh_folder
            .unwrap_or_else(|| settings.root_or_default());
        let vault = VaultCli::new(global.vault_url, global.vault_token);
        Ok(Self {
            root,
            settings,
            vault,
        })
    }

    /// Applications under the manifest root.
    pub fn apps(&self) -> Result<Vec<App>> {
        App::discover(&self.root)
    }
}

/// Execute a command.
pub fn execute(command: Command, global: GlobalArgs) -> Result<()> {
    let ctx = Context::load(global)?;

    match command {
        Command::Create {
            env,
            verify,
            secret_name_prefix,
            secret_name_suffix,
            namespace,
            kube_config,
        } => create::execute(
            &ctx,
            create::CreateArgs {
                env,
                verify,
                secret_name_prefix,
                secret_name_suffix,
                namespace,
                kube_config,
            },
        ),
        Command::GenerateEnvFile {
            env,
            env_file_dir,
            remove_export,
        } => env_file::execute(&ctx, &env, &env_file_dir, remove_export),
        Command::GeneratePolicies {
            appname,
            project_id,
            policy_prefix,
            dependent_apps,
            no_lock_prod_claims,
            apply,
        } => policies::execute(
            &ctx,
            policies::PolicyArgs {
                appname,
                project_id,
                policy_prefix,
                dependent_apps,
                no_lock_prod_claims,
                apply,
            },
        ),
        Command::Delete {
            appname,
            policy_prefix,
        } => delete::execute(&ctx, appname, policy_prefix),
    }
}
