//! JWT auth role compilation.
//!
//! A role binds policy names to CI job claims. Production-tier roles can be
//! locked to the release branch through `ref`/`ref_type` claims, which are
//! omitted from the document entirely when not locked.

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    LOCKED_REF, LOCKED_REF_TYPE, PRODUCTION_ENVS, ROLE_CLAIMS_TYPE, ROLE_MAX_TTL_SECONDS,
    ROLE_TYPE, ROLE_USER_CLAIM,
};
use crate::error::Result;

/// Claims a token must carry to assume the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundClaims {
    pub project_id: String,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
}

/// Role document, serialized in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDocument {
    pub role_type: String,
    pub policies: Vec<String>,
    #[serde(rename = "token_explicit_max_ttl")]
    pub max_token_ttl_seconds: u64,
    #[serde(rename = "user_claim")]
    pub claim_field: String,
    #[serde(rename = "bound_claims_type")]
    pub claim_match_mode: String,
    pub bound_claims: BoundClaims,
}

impl RoleDocument {
    /// Build a role for `policies`, kept in the given order.
    ///
    /// Branch claims are set only when the environment is production tier
    /// and locking is enabled.
    pub fn compile(
        policies: Vec<String>,
        production_tier: bool,
        project_id: &str,
        lock_production_claims: bool,
    ) -> Self {
        let locked = production_tier && lock_production_claims;
        Self {
            role_type: ROLE_TYPE.to_string(),
            policies,
            max_token_ttl_seconds: ROLE_MAX_TTL_SECONDS,
            claim_field: ROLE_USER_CLAIM.to_string(),
            claim_match_mode: ROLE_CLAIMS_TYPE.to_string(),
            bound_claims: BoundClaims {
                project_id: project_id.to_string(),
                git_ref: locked.then(|| LOCKED_REF.to_string()),
                ref_type: locked.then(|| LOCKED_REF_TYPE.to_string()),
            },
        }
    }

    /// Render as JSON with one-space indentation and a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if serialization fails.
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Whether `env` gets branch-locked roles.
pub fn is_production_tier(env: &str) -> bool {
    PRODUCTION_ENVS.contains(&env)
}
