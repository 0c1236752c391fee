//! Startup configuration.
//!
//! ```toml
//! locale = "zh"
//! duplicate_policy = "overwrite"
//! include_defaults = true
//! builtin_rules = true
//!
//! [messages]
//! phone = "{0}不是有效的手机号码"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Locale;
use crate::context::LocalizationContextBuilder;
use crate::error::{ConfigError, Result};
use crate::registry::DuplicatePolicy;

/// Settings selecting the active locale and its message overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalizationConfig {
    /// Active locale identifier.
    pub locale: String,

    /// Applied to both rule registration and message binding.
    pub duplicate_policy: DuplicatePolicy,

    /// Bind the built-in message table for `locale` before `messages`.
    pub include_defaults: bool,

    /// Register the built-in predicates. Ignored without the `builtin` feature.
    pub builtin_rules: bool,

    /// Rule → template overrides for the active locale, bound last.
    pub messages: BTreeMap<String, String>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            locale: "zh".to_owned(),
            duplicate_policy: DuplicatePolicy::Overwrite,
            include_defaults: true,
            builtin_rules: true,
            messages: BTreeMap::new(),
        }
    }
}

impl LocalizationConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded localization config");
        Self::from_toml_str(&source)
    }

    /// Checks values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Locale::parse(&self.locale).map(drop)
    }

    /// Turns the configuration into a builder with defaults, built-in rules
    /// and overrides already registered.
    ///
    /// Further rules can be registered on the returned builder before
    /// [`build`](LocalizationContextBuilder::build).
    pub fn into_builder(self) -> Result<LocalizationContextBuilder> {
        let locale = Locale::parse(&self.locale)?;
        let mut builder = LocalizationContextBuilder::new(locale.clone(), self.duplicate_policy);

        if self.include_defaults {
            builder = builder.with_default_messages()?;
        }

        #[cfg(feature = "builtin")]
        let mut builder = if self.builtin_rules {
            builder.with_builtin_rules()?
        } else {
            builder
        };

        for (rule, template) in self.messages {
            builder = builder.bind_translation(locale.clone(), rule, template)?;
        }

        Ok(builder)
    }
}
