//! Error types for the registration phase.
//!
//! Nothing here is produced while validating a request: rule lookups that
//! fail at request time become [`FieldFailure`](crate::failure::FieldFailure)
//! records, and missing translations degrade to a fallback message. These
//! errors only surface while a [`LocalizationContext`](crate::LocalizationContext)
//! is being assembled, where they are meant to abort startup.

use std::path::PathBuf;

use crate::catalog::Locale;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

// ============================================================================
// REGISTRY ERRORS
// ============================================================================

/// Failures while registering predicates or binding templates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A predicate with this name already exists and the policy forbids replacing it.
    #[error("validation rule `{rule}` is already registered")]
    DuplicateRule {
        /// Offending rule name.
        rule: String,
    },

    /// A template is already bound for this (locale, rule) pair.
    #[error("a message for rule `{rule}` is already bound in locale `{locale}`")]
    ConflictingBinding {
        /// Locale of the existing binding.
        locale: Locale,
        /// Rule of the existing binding.
        rule: String,
    },

    /// Rule names must be non-empty and free of separators.
    #[error("invalid rule name `{0}`")]
    InvalidRuleName(String),

    /// The active locale ended up without a single message binding.
    #[error("no messages are bound for locale `{0}`")]
    EmptyCatalog(Locale),
}

/// A rule name referenced at validation time has no registered predicate.
///
/// The runner never propagates this; it turns it into an
/// [`UnknownRule`](crate::failure::FailureKind::UnknownRule) failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation rule `{rule}` is not registered")]
pub struct RuleNotFound {
    /// The unresolved rule name.
    pub rule: String,
}

// ============================================================================
// CONFIG ERRORS
// ============================================================================

/// Failures while loading a [`LocalizationConfig`](crate::config::LocalizationConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Locale identifiers are ASCII alphanumerics plus `-` and `_`.
    #[error("invalid locale `{0}`")]
    InvalidLocale(String),

    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML document did not match the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// UMBRELLA
// ============================================================================

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// See [`RegistryError`].
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A typed input could not be converted to a JSON value.
    #[error("failed to serialize input for validation: {0}")]
    Serialize(#[from] serde_json::Error),
}
