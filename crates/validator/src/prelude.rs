//! Prelude module for convenient imports.
//!
//! Provides a single `use glossa_validator::prelude::*;` import that brings in
//! the types needed to register rules, bind messages and run validation.

pub use crate::aggregate::{FieldMessages, RenderedError, aggregate};
pub use crate::catalog::{Locale, MessageBinding, MessageCatalog, Template};
pub use crate::config::LocalizationConfig;
pub use crate::error::{ConfigError, Error, RegistryError, Result, RuleNotFound};
pub use crate::failure::{FailureKind, FieldFailure};
pub use crate::registry::{DuplicatePolicy, Predicate, PredicateRegistry};
pub use crate::runner::{Validatable, ValidationRunner};
pub use crate::schema::{FieldRules, RuleRef, Schema};
pub use crate::translate::{Translator, UNKNOWN_RULE};
pub use crate::{LocalizationContext, LocalizationContextBuilder, ReloadableContext};
