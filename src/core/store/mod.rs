//! Secret store access.
//!
//! The store is reached through two small capabilities so resolution and
//! policy application can run against Vault or an in-memory map:
//!
//! - [`SecretStore`] reads the field map at a physical path.
//! - [`PolicyStore`] uploads and removes policies and jwt roles.
//!
//! ## Adding a New Store
//!
//! 1. Implement `SecretStore` (and `PolicyStore` if it can take policies)
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Result, StoreError};

mod memory;
mod vault;

pub use memory::MemoryStore;
pub use vault::VaultCli;

/// Field name to value, as returned by a store read.
pub type FieldMap = BTreeMap<String, Value>;

/// Field carrying the payload of a versioned (kv v2) read.
const VERSIONED_WRAPPER: &str = "data";

/// Read access to secrets.
pub trait SecretStore {
    /// Read the raw response at a physical path.
    ///
    /// Returns `Ok(None)` when nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on transport or authentication failures.
    fn read(&self, path: &str) -> Result<Option<FieldMap>>;
}

/// Write access to policies and roles.
pub trait PolicyStore {
    /// Create or replace a policy.
    fn put_policy(&self, name: &str, policy: &str) -> Result<()>;

    /// Remove a policy.
    fn delete_policy(&self, name: &str) -> Result<()>;

    /// Create or replace a jwt role from its JSON document.
    fn put_role(&self, name: &str, role: &str) -> Result<()>;

    /// Remove a jwt role.
    fn delete_role(&self, name: &str) -> Result<()>;
}

/// A decoded read, tagged by engine shape.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretData {
    /// Flat field map (kv v1).
    Legacy(FieldMap),
    /// Field map unwrapped from the `data` field (kv v2).
    Versioned(FieldMap),
}

impl SecretData {
    /// Decide the shape of a raw read once.
    ///
    /// A `data` field marks a versioned read; it must hold an object.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PathNotFound` if `data` is null (a deleted or
    /// destroyed version) and `StoreError::Decode` if it is not an object.
    pub fn decode(path: &str, mut raw: FieldMap) -> Result<Self> {
        match raw.remove(VERSIONED_WRAPPER) {
            None => Ok(Self::Legacy(raw)),
            Some(Value::Null) => Err(StoreError::PathNotFound {
                path: path.to_string(),
            }
            .into()),
            Some(Value::Object(fields)) => Ok(Self::Versioned(fields.into_iter().collect())),
            Some(_) => Err(StoreError::Decode {
                path: path.to_string(),
            }
            .into()),
        }
    }

    /// The unwrapped field map.
    pub fn fields(&self) -> &FieldMap {
        match self {
            Self::Legacy(fields) | Self::Versioned(fields) => fields,
        }
    }

    /// Whether the read came from a versioned engine.
    pub fn is_versioned(&self) -> bool {
        matches!(self, Self::Versioned(_))
    }
}
