//! `{{NAME}}` placeholder substitution.
//!
//! Only flat substitution from a name lookup is supported. Names that the
//! lookup cannot answer are replaced with [`UNRESOLVED`] and reported as a
//! warning; resolution itself never fails.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::core::constants::UNRESOLVED;
use crate::core::diagnostics::Diagnostics;

/// Name to value lookup used for substitution.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    // Lazy and brace-bounded: `{{A}} {{B}}` is two placeholders.
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{([^}]*?)\}\}").expect("placeholder pattern"))
}

/// Look a variable up in the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Replace every `{{NAME}}` in `text` using `lookup`.
///
/// Each distinct placeholder is looked up once; a missing name produces one
/// warning no matter how often it occurs. Substituted values are not
/// scanned again.
pub fn resolve(text: &str, lookup: Lookup<'_>, diag: &mut Diagnostics) -> String {
    let mut seen: HashMap<String, String> = HashMap::new();

    placeholder()
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            if let Some(value) = seen.get(name) {
                return value.clone();
            }
            let value = match lookup(name) {
                Some(value) => value,
                None => {
                    diag.warn(format!(
                        "unable to look up variable {}, substituting {}",
                        name, UNRESOLVED
                    ));
                    UNRESOLVED.to_string()
                }
            };
            seen.insert(name.to_string(), value.clone());
            value
        })
        .into_owned()
}

/// Whether `text` still carries the unresolved marker.
pub fn is_unresolved(text: &str) -> bool {
    text.contains(UNRESOLVED)
}
