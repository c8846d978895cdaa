//! Vaultmap - resolve secret manifests against Vault.
//!
//! Each application keeps one YAML manifest per environment describing which
//! Vault paths and keys it needs. Vaultmap merges those manifests, pulls the
//! secrets into env files or cluster secrets, and compiles the same
//! manifests into read policies and jwt roles.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── create        # Push secrets to the cluster
//! │   ├── env_file      # Write .env files
//! │   ├── policies      # Generate and apply policies and roles
//! │   └── delete        # Remove policies and roles
//! └── core/             # Core library components
//!     ├── app           # Manifest directories and discovery
//!     ├── manifest      # Manifest parsing and merging
//!     ├── vars          # {{NAME}} substitution
//!     ├── path          # Logical to physical store paths
//!     ├── resolver      # Manifest to key/value secrets
//!     ├── policy        # Read policy compiler
//!     ├── role          # jwt role compiler
//!     ├── generate      # Policy/role generation across environments
//!     ├── pull          # Secret pulls across applications
//!     ├── store/        # Secret store backends
//!     │   ├── vault     # vault CLI backend
//!     │   └── memory    # In-memory backend
//!     ├── cluster       # Cluster secret output
//!     ├── envfile       # Env file output
//!     └── config        # .vaultmap.toml settings
//! ```
//!
//! # Example
//!
//! ```
//! use vaultmap::core::path::normalize;
//!
//! assert_eq!(normalize("secret/foo/bar"), "secret/data/foo/bar");
//! ```

pub mod cli;
pub mod core;
pub mod error;
