//! Read policy compilation.
//!
//! Collects every path a set of manifests reads, normalizes them, and emits
//! one read-only block per unique path:
//!
//! ```text
//! path "secret/data/machine/anotherdep/prod" {
//!   capabilities = ["read"]
//! }
//!
//! ```
//!
//! Paths are sorted, so the document is byte-identical for the same input
//! regardless of manifest or key order.

use std::collections::BTreeSet;

use crate::core::constants::{POLICY_WILDCARD, READ_CAPABILITY};
use crate::core::manifest::Manifest;
use crate::core::path;
use crate::core::vars::is_unresolved;

/// Sorted, de-duplicated read paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyDocument {
    paths: BTreeSet<String>,
}

impl PolicyDocument {
    /// Compile the union of paths read by `manifests`.
    pub fn compile<'a>(manifests: impl IntoIterator<Item = &'a Manifest>) -> Self {
        let paths = manifests
            .into_iter()
            .flat_map(Manifest::paths)
            .map(|logical| wildcard_unresolved(&path::normalize(logical)))
            .collect();
        Self { paths }
    }

    /// Normalized paths in document order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Number of path blocks.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the policy grants nothing.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Render the policy text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for path in &self.paths {
            out.push_str(&format!(
                "path {} {{\n  capabilities = [\"{}\"]\n}}\n\n",
                hcl_quote(path),
                READ_CAPABILITY
            ));
        }
        out
    }
}

/// Quote `raw` as an HCL string literal, escaping template sequences.
fn hcl_quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Collapse segments left unresolved by variable substitution into `+`.
fn wildcard_unresolved(path: &str) -> String {
    if !is_unresolved(path) {
        return path.to_string();
    }
    path.split('/')
        .map(|segment| {
            if is_unresolved(segment) {
                POLICY_WILDCARD
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
