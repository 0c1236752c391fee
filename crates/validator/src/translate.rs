//! Translation engine: failure → rendered text.
//!
//! Rendering never fails. A rule with no template in the active locale
//! produces `"<field> failed validation rule <rule>"`, so a predicate that was
//! registered but never translated still yields something a developer can
//! act on.

use tracing::debug;

use crate::catalog::{Locale, MessageCatalog};
use crate::failure::{FailureKind, FieldFailure};

/// Catalog key for the message shown when a field references an unregistered rule.
///
/// The template receives the field as `{0}` and the unresolved rule name as `{1}`.
pub const UNKNOWN_RULE: &str = "unknown_rule";

/// Renders a failure of `rule` on `field` using the `locale` template.
///
/// `{0}` receives `field`; `{i}` receives `params[i - 1]` or the empty string.
///
/// # Examples
///
/// ```
/// use glossa_validator::catalog::{Locale, MessageCatalog};
/// use glossa_validator::translate::render;
///
/// let zh = Locale::new("zh");
/// let mut catalog = MessageCatalog::new();
/// catalog.bind(&zh, "min", "{0}最小只能为{1}").unwrap();
///
/// assert_eq!(render(&catalog, &zh, "Age", "min", &["18"]), "Age最小只能为18");
/// assert_eq!(
///     render(&catalog, &zh, "Age", "max", &["60"]),
///     "Age failed validation rule max"
/// );
/// ```
pub fn render<S: AsRef<str>>(
    catalog: &MessageCatalog,
    locale: &Locale,
    field: &str,
    rule: &str,
    params: &[S],
) -> String {
    match catalog.lookup(locale, rule) {
        Some(template) => template.render(field, params),
        None => {
            debug!(%locale, rule, field, "no message bound, using fallback");
            fallback_message(field, rule)
        }
    }
}

/// The untranslated message used when no template is bound.
pub fn fallback_message(field: &str, rule: &str) -> String {
    format!("{field} failed validation rule {rule}")
}

fn unknown_rule_fallback(field: &str, rule: &str) -> String {
    format!("{field} references unregistered validation rule {rule}")
}

/// Renders against one catalog and one locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    catalog: &'a MessageCatalog,
    locale: &'a Locale,
}

impl<'a> Translator<'a> {
    /// Creates a translator over `catalog` for `locale`.
    pub fn new(catalog: &'a MessageCatalog, locale: &'a Locale) -> Self {
        Self { catalog, locale }
    }

    /// The locale messages are rendered in.
    pub fn locale(&self) -> &'a Locale {
        self.locale
    }

    /// See [`render`].
    pub fn render<S: AsRef<str>>(&self, field: &str, rule: &str, params: &[S]) -> String {
        render(self.catalog, self.locale, field, rule, params)
    }

    /// Renders one failure record.
    ///
    /// Unknown-rule failures go through the [`UNKNOWN_RULE`] template with the
    /// offending rule name as `{1}`.
    pub fn render_failure(&self, failure: &FieldFailure) -> String {
        match failure.kind {
            FailureKind::Failed => {
                self.render(&failure.field, &failure.rule, failure.params.as_slice())
            }
            FailureKind::UnknownRule => match self.catalog.lookup(self.locale, UNKNOWN_RULE) {
                Some(template) => template.render(&failure.field, &[failure.rule.as_str()]),
                None => unknown_rule_fallback(&failure.field, &failure.rule),
            },
        }
    }
}
