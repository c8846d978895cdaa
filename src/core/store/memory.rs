//! In-memory store.
//!
//! Holds raw read responses keyed by physical path and records uploaded
//! policies and roles. Used for dry runs and tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde_json::Value;

use super::{FieldMap, PolicyStore, SecretStore};
use crate::core::path;
use crate::error::Result;

/// Store backed by maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    secrets: BTreeMap<String, FieldMap>,
    policies: RefCell<BTreeMap<String, String>>,
    roles: RefCell<BTreeMap<String, String>>,
    reads: RefCell<Vec<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw response at a physical path.
    pub fn insert(&mut self, physical_path: &str, raw: FieldMap) {
        self.secrets.insert(physical_path.to_string(), raw);
    }

    /// Store fields the way a kv v2 mount would: under the normalized path,
    /// wrapped in `data`.
    pub fn insert_versioned<K, V>(&mut self, logical_path: &str, fields: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let inner: serde_json::Map<String, Value> = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let mut raw = FieldMap::new();
        raw.insert("data".to_string(), Value::Object(inner));
        self.insert(&path::normalize(logical_path), raw);
    }

    /// Store flat fields at a physical path, the way a kv v1 mount would.
    pub fn insert_legacy<K, V>(&mut self, physical_path: &str, fields: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let raw = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.insert(physical_path, raw);
    }

    /// Policies uploaded so far.
    pub fn policies(&self) -> BTreeMap<String, String> {
        self.policies.borrow().clone()
    }

    /// Roles uploaded so far.
    pub fn roles(&self) -> BTreeMap<String, String> {
        self.roles.borrow().clone()
    }

    /// Physical paths read so far, in order.
    pub fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }
}

impl SecretStore for MemoryStore {
    fn read(&self, path: &str) -> Result<Option<FieldMap>> {
        self.reads.borrow_mut().push(path.to_string());
        Ok(self.secrets.get(path).cloned())
    }
}

impl PolicyStore for MemoryStore {
    fn put_policy(&self, name: &str, policy: &str) -> Result<()> {
        self.policies
            .borrow_mut()
            .insert(name.to_string(), policy.to_string());
        Ok(())
    }

    fn delete_policy(&self, name: &str) -> Result<()> {
        self.policies.borrow_mut().remove(name);
        Ok(())
    }

    fn put_role(&self, name: &str, role: &str) -> Result<()> {
        self.roles
            .borrow_mut()
            .insert(name.to_string(), role.to_string());
        Ok(())
    }

    fn delete_role(&self, name: &str) -> Result<()> {
        self.roles.borrow_mut().remove(name);
        Ok(())
    }
}
