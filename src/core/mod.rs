//! Core library components.
//!
//! Manifest loading and merging, secret resolution, and policy and role
//! compilation. Nothing here prints; warnings go through [`Diagnostics`].
//!
//! [`Diagnostics`]: diagnostics::Diagnostics

pub mod app;
pub mod cluster;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod envfile;
pub mod generate;
pub mod manifest;
pub mod path;
pub mod policy;
pub mod pull;
pub mod resolver;
pub mod role;
pub mod store;
pub mod vars;
