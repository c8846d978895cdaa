//! Secret path normalization.
//!
//! Manifests address secrets the way the legacy kv engine does
//! (`secret/team/app`). The versioned engine nests values one level deeper,
//! under a `data` segment right after the mount (`secret/data/team/app`).

use crate::core::constants::DATA_SEGMENT;

/// Rewrite a logical secret path into its versioned-engine physical path.
///
/// The first segment is the mount; `/data` is inserted right after it.
/// Not idempotent: normalize exactly once.
///
/// ```
/// use vaultmap::core::path::normalize;
///
/// assert_eq!(normalize("secret/foo/bar"), "secret/data/foo/bar");
/// ```
pub fn normalize(logical: &str) -> String {
    match logical.split_once('/') {
        Some((mount, rest)) => format!("{}/{}/{}", mount, DATA_SEGMENT, rest),
        None => format!("{}/{}", logical, DATA_SEGMENT),
    }
}
