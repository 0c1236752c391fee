//! Predicate registry.
//!
//! Maps rule names to opaque predicates. The registry owns nothing about
//! language; it only answers "which check does this name refer to".

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{RegistryError, RuleNotFound};

// ============================================================================
// PREDICATE
// ============================================================================

/// A named boolean check applied to a field value.
///
/// `value` is `Value::Null` when the field is absent from the input.
/// `params` are the rule parameters from the field declaration, e.g. `["3"]`
/// for `min=3`.
pub trait Predicate: Send + Sync {
    /// Returns `true` when the value satisfies the rule.
    fn evaluate(&self, value: &Value, params: &[String]) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Value, &[String]) -> bool + Send + Sync,
{
    fn evaluate(&self, value: &Value, params: &[String]) -> bool {
        self(value, params)
    }
}

/// Shared handle to a registered predicate.
pub type PredicateRef = Arc<dyn Predicate>;

// ============================================================================
// DUPLICATE POLICY
// ============================================================================

/// What happens when a rule or message is registered twice under one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later registration silently replaces the earlier one.
    #[default]
    Overwrite,
    /// A second registration under the same key is an error.
    Reject,
}

pub(crate) fn check_rule_name(rule: &str) -> Result<(), RegistryError> {
    let valid = !rule.is_empty()
        && !rule
            .chars()
            .any(|c| c == ',' || c == '=' || c.is_whitespace());
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidRuleName(rule.to_owned()))
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Name → predicate table.
#[derive(Clone, Default)]
pub struct PredicateRegistry {
    policy: DuplicatePolicy,
    rules: HashMap<String, PredicateRef>,
}

impl PredicateRegistry {
    /// Creates an empty registry with the last-registration-wins policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            rules: HashMap::new(),
        }
    }

    /// Returns the duplicate policy.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Registers a predicate under `name`.
    pub fn register<P>(
        &mut self,
        name: impl Into<String>,
        predicate: P,
    ) -> Result<(), RegistryError>
    where
        P: Predicate + 'static,
    {
        self.register_shared(name, Arc::new(predicate))
    }

    /// Registers a closure under `name`.
    ///
    /// ```
    /// use glossa_validator::registry::PredicateRegistry;
    /// use serde_json::{Value, json};
    ///
    /// let mut registry = PredicateRegistry::new();
    /// registry
    ///     .register_fn("even", |value, _| value.as_i64().is_some_and(|n| n % 2 == 0))
    ///     .unwrap();
    ///
    /// let even = registry.get("even").unwrap();
    /// assert!(even.evaluate(&json!(4), &[]));
    /// assert!(!even.evaluate(&Value::Null, &[]));
    /// ```
    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        predicate: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&Value, &[String]) -> bool + Send + Sync + 'static,
    {
        self.register_shared(name, Arc::new(predicate))
    }

    /// Registers an already shared predicate.
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        predicate: PredicateRef,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        check_rule_name(&name)?;

        if self.rules.contains_key(&name) {
            if self.policy == DuplicatePolicy::Reject {
                return Err(RegistryError::DuplicateRule { rule: name });
            }
            debug!(rule = %name, "replacing validation rule");
        } else {
            debug!(rule = %name, "registered validation rule");
        }

        self.rules.insert(name, predicate);
        Ok(())
    }

    /// Returns the predicate registered under `name`.
    pub fn get(&self, name: &str) -> Option<&PredicateRef> {
        self.rules.get(name)
    }

    /// Like [`get`](Self::get), but reports a missing rule as [`RuleNotFound`].
    pub fn resolve(&self, name: &str) -> Result<&PredicateRef, RuleNotFound> {
        self.get(name).ok_or_else(|| RuleNotFound {
            rule: name.to_owned(),
        })
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("policy", &self.policy)
            .field("rules", &self.names())
            .finish()
    }
}
