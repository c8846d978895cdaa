//! Warning sink passed through resolution and generation.
//!
//! Non-fatal problems (unresolved variables, fallback manifests) are
//! recorded here instead of being logged from global state, so callers and
//! tests can inspect exactly what was reported during a run.

use tracing::debug;

/// Collects warnings for a single run. Each one is also logged at debug
/// level; printing them is left to the caller.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(warning = %message, "recorded");
        self.warnings.push(message);
    }

    /// All warnings recorded so far, in order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Drain recorded warnings.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}
