//! Secret resolution.
//!
//! Turns a merged manifest into a flat `NAME -> value` map by reading the
//! store. Two passes:
//!
//! 1. Full paths, in manifest order. Every field becomes an upper-cased
//!    output variable; later paths overwrite earlier ones.
//! 2. Key definitions. Each reads one named field, optionally base64
//!    encoding it after variable substitution.
//!
//! Any failed read aborts the whole manifest; no partial set is returned.

use std::collections::{BTreeMap, HashMap};

use base64::Engine;
use serde_json::Value;
use tracing::debug;

use crate::core::diagnostics::Diagnostics;
use crate::core::manifest::Manifest;
use crate::core::path;
use crate::core::store::{SecretData, SecretStore};
use crate::core::vars::{self, Lookup};
use crate::error::{Result, StoreError};

/// Resolved secrets for one application and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSecrets {
    pub secret_name: String,
    pub values: BTreeMap<String, String>,
}

impl ResolvedSecrets {
    /// Secret name with optional `<prefix>-` and `-<suffix>` applied.
    pub fn decorated_name(&self, prefix: Option<&str>, suffix: Option<&str>) -> String {
        let mut name = self.secret_name.clone();
        if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
            name = format!("{}-{}", prefix, name);
        }
        if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
            name = format!("{}-{}", name, suffix);
        }
        name
    }
}

/// Per-run read cache so a path shared by both passes is read once.
struct Reader<'a> {
    store: &'a dyn SecretStore,
    cache: HashMap<String, SecretData>,
}

impl<'a> Reader<'a> {
    fn new(store: &'a dyn SecretStore) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    fn read(&mut self, physical: &str) -> Result<&SecretData> {
        if !self.cache.contains_key(physical) {
            debug!(path = physical, "reading secret");
            let raw = self
                .store
                .read(physical)?
                .ok_or_else(|| StoreError::PathNotFound {
                    path: physical.to_string(),
                })?;
            let data = SecretData::decode(physical, raw)?;
            debug!(path = physical, versioned = data.is_versioned(), "decoded secret");
            self.cache.insert(physical.to_string(), data);
        }
        Ok(&self.cache[physical])
    }
}

/// Render a stored scalar as text.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Resolve every secret a manifest declares.
///
/// # Errors
///
/// Returns `StoreError::PathNotFound` when a path holds nothing,
/// `StoreError::KeyNotFound` when a key definition's field is missing, and
/// `StoreError::Decode` for malformed versioned responses.
pub fn resolve(
    manifest: &Manifest,
    store: &dyn SecretStore,
    lookup: Lookup<'_>,
    diag: &mut Diagnostics,
) -> Result<ResolvedSecrets> {
    let mut reader = Reader::new(store);
    let mut values = BTreeMap::new();

    for logical in &manifest.full_paths {
        let physical = path::normalize(logical);
        let data = reader.read(&physical)?;
        for (field, value) in data.fields() {
            let resolved = vars::resolve(&stringify(value), lookup, diag);
            values.insert(field.to_uppercase(), resolved);
        }
    }

    for (name, def) in &manifest.keys {
        let physical = path::normalize(&def.path);
        let data = reader.read(&physical)?;
        let value = match data.fields().get(&def.key) {
            Some(value) if !value.is_null() => value,
            _ => {
                return Err(StoreError::KeyNotFound {
                    key: def.key.clone(),
                    path: physical,
                }
                .into())
            }
        };

        let mut resolved = vars::resolve(&stringify(value), lookup, diag);
        if def.base64 {
            resolved = base64::engine::general_purpose::STANDARD.encode(resolved.as_bytes());
        }
        debug!(name = %name, path = %physical, key = %def.key, "pulled secret");
        values.insert(name.clone(), resolved);
    }

    Ok(ResolvedSecrets {
        secret_name: manifest.secret_name.clone(),
        values,
    })
}
