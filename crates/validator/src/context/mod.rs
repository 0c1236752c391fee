//! The localization context: registry, catalog and active locale in one
//! immutable value.
//!
//! A context is assembled once during startup with a
//! [`LocalizationContextBuilder`] and then shared by reference (typically via
//! `Arc`) with every request handler. All request-time operations take
//! `&self`; nothing is mutated after [`build`](LocalizationContextBuilder::build).
//!
//! # Examples
//!
//! ```
//! use glossa_validator::LocalizationContext;
//! use glossa_validator::schema::Schema;
//! use serde_json::json;
//!
//! let ctx = LocalizationContext::builder("zh")
//!     .register_rule("chinese_name", |v, _| v.as_str().is_some_and(|s| s.chars().count() >= 2))?
//!     .bind_translation("zh", "chinese_name", "{0}必须是2-4个中文字符")?
//!     .build()?;
//!
//! let schema = Schema::new().field("Name", "chinese_name");
//! let messages = ctx.check(&schema, &json!({"Name": "王"})).unwrap_err();
//! assert_eq!(messages.get("Name"), Some("Name必须是2-4个中文字符"));
//! # Ok::<(), glossa_validator::Error>(())
//! ```

mod reload;

use serde_json::Value;
use tracing::{debug, info};

use crate::aggregate::{FieldMessages, aggregate};
use crate::catalog::{Locale, MessageBinding, MessageCatalog, Template};
use crate::error::{RegistryError, Result};
use crate::failure::FieldFailure;
use crate::locales;
use crate::registry::{DuplicatePolicy, Predicate, PredicateRegistry};
use crate::runner::{Validatable, ValidationRunner};
use crate::schema::Schema;
use crate::translate::Translator;

pub use reload::ReloadableContext;

// ============================================================================
// CONTEXT
// ============================================================================

/// Registered predicates, bound messages and the active locale.
#[derive(Debug, Clone)]
pub struct LocalizationContext {
    locale: Locale,
    registry: PredicateRegistry,
    catalog: MessageCatalog,
}

impl LocalizationContext {
    /// Starts a builder for `locale` with the last-registration-wins policy.
    pub fn builder(locale: impl Into<Locale>) -> LocalizationContextBuilder {
        LocalizationContextBuilder::new(locale, DuplicatePolicy::Overwrite)
    }

    /// The active locale.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Registered predicates.
    pub fn registry(&self) -> &PredicateRegistry {
        &self.registry
    }

    /// Bound messages for every locale.
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Translation engine for the active locale.
    pub fn translator(&self) -> Translator<'_> {
        Translator::new(&self.catalog, &self.locale)
    }

    /// Runner over the registered predicates.
    pub fn runner(&self) -> ValidationRunner<'_> {
        ValidationRunner::new(&self.registry)
    }

    /// Renders one failure of `rule` on `field` in the active locale.
    pub fn render<S: AsRef<str>>(&self, field: &str, rule: &str, params: &[S]) -> String {
        self.translator().render(field, rule, params)
    }

    /// Runs `schema` over `input` and returns the raw failures.
    pub fn validate(&self, schema: &Schema, input: &Value) -> Vec<FieldFailure> {
        self.runner().validate(schema, input)
    }

    /// Serializes `input` and runs its own schema over it.
    pub fn validate_typed<T: Validatable>(&self, input: &T) -> Result<Vec<FieldFailure>> {
        self.runner().validate_typed(input)
    }

    /// Renders failures into a field → message mapping.
    pub fn translate(&self, failures: &[FieldFailure]) -> FieldMessages {
        let translator = self.translator();
        aggregate(failures, |failure| translator.render_failure(failure))
    }

    /// Validates and translates in one step.
    ///
    /// `Ok(())` means every rule held; `Err` carries one message per failing field.
    pub fn check(&self, schema: &Schema, input: &Value) -> Result<(), FieldMessages> {
        let failures = self.validate(schema, input);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(self.translate(&failures))
        }
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Registration-phase builder for a [`LocalizationContext`].
///
/// Registration methods return `Result<Self, RegistryError>` so a chain can
/// stop at the first misconfiguration with `?`.
#[derive(Debug)]
pub struct LocalizationContextBuilder {
    locale: Locale,
    registry: PredicateRegistry,
    catalog: MessageCatalog,
}

impl LocalizationContextBuilder {
    /// Creates a builder for `locale` applying `policy` to rules and messages.
    pub fn new(locale: impl Into<Locale>, policy: DuplicatePolicy) -> Self {
        Self {
            locale: locale.into(),
            registry: PredicateRegistry::with_policy(policy),
            catalog: MessageCatalog::with_policy(policy),
        }
    }

    /// The locale the built context will render in.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Registers a closure predicate.
    pub fn register_rule<F>(
        mut self,
        name: impl Into<String>,
        predicate: F,
    ) -> Result<Self, RegistryError>
    where
        F: Fn(&Value, &[String]) -> bool + Send + Sync + 'static,
    {
        self.registry.register_fn(name, predicate)?;
        Ok(self)
    }

    /// Registers a predicate type.
    pub fn register_predicate<P>(
        mut self,
        name: impl Into<String>,
        predicate: P,
    ) -> Result<Self, RegistryError>
    where
        P: Predicate + 'static,
    {
        self.registry.register(name, predicate)?;
        Ok(self)
    }

    /// Registers the [`builtin`](crate::builtin) predicates.
    #[cfg(feature = "builtin")]
    pub fn with_builtin_rules(mut self) -> Result<Self, RegistryError> {
        crate::builtin::register_builtin(&mut self.registry)?;
        Ok(self)
    }

    /// Binds `template` to `rule` in `locale`.
    pub fn bind_translation(
        mut self,
        locale: impl Into<Locale>,
        rule: impl Into<String>,
        template: impl Into<Template>,
    ) -> Result<Self, RegistryError> {
        self.catalog.bind(&locale.into(), rule, template)?;
        Ok(self)
    }

    /// Inserts a fully specified binding.
    pub fn bind(mut self, binding: MessageBinding) -> Result<Self, RegistryError> {
        self.catalog.insert(binding)?;
        Ok(self)
    }

    /// Binds every `(rule, template)` pair of `table` in `locale`.
    pub fn bind_table(
        mut self,
        locale: impl Into<Locale>,
        table: &[(&str, &str)],
    ) -> Result<Self, RegistryError> {
        self.catalog.bind_table(&locale.into(), table)?;
        Ok(self)
    }

    /// Binds the built-in message table for the active locale, if one exists.
    ///
    /// Call this before binding custom templates so they replace the defaults.
    pub fn with_default_messages(self) -> Result<Self, RegistryError> {
        match locales::defaults_for(&self.locale) {
            Some(table) => {
                let locale = self.locale.clone();
                self.bind_table(locale, table)
            }
            None => {
                debug!(locale = %self.locale, "no built-in messages for locale");
                Ok(self)
            }
        }
    }

    /// Freezes the registration phase.
    ///
    /// Fails with [`RegistryError::EmptyCatalog`] when nothing is bound for the
    /// active locale: such a process could only ever show fallback messages.
    pub fn build(self) -> Result<LocalizationContext, RegistryError> {
        if !self.catalog.has_locale(&self.locale) {
            return Err(RegistryError::EmptyCatalog(self.locale));
        }

        info!(
            locale = %self.locale,
            rules = self.registry.len(),
            messages = self.catalog.len_for(&self.locale),
            "localization context ready"
        );

        Ok(LocalizationContext {
            locale: self.locale,
            registry: self.registry,
            catalog: self.catalog,
        })
    }
}
