//! Locale-scoped message catalog.
//!
//! The catalog maps `(locale, rule)` to a [`Template`]. It is populated during
//! startup and then frozen inside a [`LocalizationContext`](crate::LocalizationContext),
//! so lookups take `&self` and need no locking.
//!
//! # Examples
//!
//! ```
//! use glossa_validator::catalog::{Locale, MessageCatalog};
//!
//! let zh = Locale::new("zh");
//! let mut catalog = MessageCatalog::new();
//! catalog.bind(&zh, "phone", "{0}必须是有效的中国手机号").unwrap();
//!
//! let template = catalog.lookup(&zh, "phone").unwrap();
//! assert_eq!(template.render("Mobile", &[] as &[&str]), "Mobile必须是有效的中国手机号");
//! ```

mod template;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, RegistryError};
use crate::registry::{DuplicatePolicy, check_rule_name};

pub use template::Template;

// ============================================================================
// LOCALE
// ============================================================================

/// A language/region identifier such as `zh` or `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Wraps an identifier without checking it.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses an identifier, accepting ASCII alphanumerics, `-` and `_`.
    pub fn parse(id: &str) -> Result<Self, ConfigError> {
        let id = id.trim();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(id.to_owned()))
        } else {
            Err(ConfigError::InvalidLocale(id.to_owned()))
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Locale {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Locale {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// BINDING
// ============================================================================

/// One `(locale, rule) -> template` association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBinding {
    /// Locale the template belongs to.
    pub locale: Locale,
    /// Rule the template describes.
    pub rule: String,
    /// The parsed template.
    pub template: Template,
    /// Whether this binding may replace an existing one with a different template.
    pub override_allowed: bool,
}

impl MessageBinding {
    /// Creates an override-allowed binding.
    pub fn new(locale: Locale, rule: impl Into<String>, template: impl Into<Template>) -> Self {
        Self {
            locale,
            rule: rule.into(),
            template: template.into(),
            override_allowed: true,
        }
    }

    /// Marks the binding as one that must not replace an existing template.
    #[must_use = "builder methods must be chained or built"]
    pub fn exclusive(mut self) -> Self {
        self.override_allowed = false;
        self
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Store of message templates, keyed by locale then rule name.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    policy: DuplicatePolicy,
    bindings: HashMap<Locale, HashMap<String, MessageBinding>>,
}

impl MessageCatalog {
    /// Creates an empty catalog with the last-registration-wins policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            bindings: HashMap::new(),
        }
    }

    /// Returns the duplicate policy.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Binds `template` to `rule` in `locale`, replacing any earlier binding.
    pub fn bind(
        &mut self,
        locale: &Locale,
        rule: impl Into<String>,
        template: impl Into<Template>,
    ) -> Result<(), RegistryError> {
        self.insert(MessageBinding::new(locale.clone(), rule, template))
            .map(drop)
    }

    /// Binds every `(rule, template)` pair of a declarative table.
    pub fn bind_table(
        &mut self,
        locale: &Locale,
        table: &[(&str, &str)],
    ) -> Result<(), RegistryError> {
        for (rule, template) in table {
            self.bind(locale, *rule, *template)?;
        }
        Ok(())
    }

    /// Inserts a binding and returns the one it replaced, if any.
    ///
    /// Re-binding the exact same template is always accepted. A different
    /// template is rejected with [`RegistryError::ConflictingBinding`] when the
    /// catalog policy is [`DuplicatePolicy::Reject`] or the new binding is
    /// [exclusive](MessageBinding::exclusive).
    pub fn insert(
        &mut self,
        binding: MessageBinding,
    ) -> Result<Option<MessageBinding>, RegistryError> {
        check_rule_name(&binding.rule)?;

        let rules = self.bindings.entry(binding.locale.clone()).or_default();
        if let Some(existing) = rules.get(&binding.rule) {
            let identical = existing.template == binding.template;
            let forbidden = self.policy == DuplicatePolicy::Reject || !binding.override_allowed;
            if !identical && forbidden {
                return Err(RegistryError::ConflictingBinding {
                    locale: binding.locale,
                    rule: binding.rule,
                });
            }
            debug!(
                locale = %binding.locale,
                rule = %binding.rule,
                "replacing message binding"
            );
        }

        Ok(rules.insert(binding.rule.clone(), binding))
    }

    /// Returns the template bound to `rule` in `locale`.
    pub fn lookup(&self, locale: &Locale, rule: &str) -> Option<&Template> {
        self.get(locale, rule).map(|binding| &binding.template)
    }

    /// Returns the full binding for `rule` in `locale`.
    pub fn get(&self, locale: &Locale, rule: &str) -> Option<&MessageBinding> {
        self.bindings.get(locale.as_str())?.get(rule)
    }

    /// Returns true if `locale` has at least one binding.
    pub fn has_locale(&self, locale: &Locale) -> bool {
        self.len_for(locale) > 0
    }

    /// Number of bindings in `locale`.
    pub fn len_for(&self, locale: &Locale) -> usize {
        self.bindings.get(locale.as_str()).map_or(0, HashMap::len)
    }

    /// Total number of bindings across all locales.
    pub fn len(&self) -> usize {
        self.bindings.values().map(HashMap::len).sum()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locales with at least one binding.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.bindings
            .iter()
            .filter(|(_, rules)| !rules.is_empty())
            .map(|(locale, _)| locale)
    }
}
