//! Field-level failure records.
//!
//! A [`FieldFailure`] says that one field failed one rule. The runner is the
//! only producer; rendering consumes each record once.

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

/// Rule parameters, e.g. `["2", "4"]` for `between=2 4`.
///
/// Stored inline for the common case of zero to two parameters.
pub type Params = SmallVec<[String; 2]>;

/// Why a field was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The predicate returned `false`.
    #[default]
    Failed,
    /// The field declares a rule that has no registered predicate.
    UnknownRule,
}

/// One field failed one rule.
///
/// # Examples
///
/// ```
/// use glossa_validator::failure::{FailureKind, FieldFailure};
///
/// let failure = FieldFailure::new("Age", "min")
///     .with_param("18")
///     .with_path("User.Age");
///
/// assert_eq!(failure.field, "Age");
/// assert_eq!(failure.path, "User.Age");
/// assert_eq!(failure.params.as_slice(), ["18"]);
/// assert_eq!(failure.kind, FailureKind::Failed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFailure {
    /// Field name used as the key of the rendered mapping.
    pub field: String,

    /// Dotted path from the input root; equals `field` for top-level fields.
    pub path: String,

    /// Rule that failed (or that could not be resolved).
    pub rule: String,

    /// Rule parameters in declaration order.
    pub params: Params,

    /// Whether the rule ran and failed or was never found.
    pub kind: FailureKind,
}

impl FieldFailure {
    /// Creates a failure of `field` against `rule` with no parameters.
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            path: field.clone(),
            field,
            rule: rule.into(),
            params: Params::new(),
            kind: FailureKind::Failed,
        }
    }

    /// Creates a failure for a rule name nothing was registered under.
    pub fn unknown_rule(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::UnknownRule,
            ..Self::new(field, rule)
        }
    }

    /// Sets the dotted path for a nested field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Appends one parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Replaces the parameter list.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the rule could not be resolved.
    pub fn is_unknown_rule(&self) -> bool {
        self.kind == FailureKind::UnknownRule
    }
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::Failed => write!(f, "[{}] {}", self.path, self.rule)?,
            FailureKind::UnknownRule => write!(f, "[{}] unknown rule {}", self.path, self.rule)?,
        }
        if !self.params.is_empty() {
            write!(f, " ({})", self.params.join(", "))?;
        }
        Ok(())
    }
}
