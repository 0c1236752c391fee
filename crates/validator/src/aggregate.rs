//! Result aggregation: failures → field → message.
//!
//! Several failures on one field collapse into a single entry; the failure
//! processed last wins. Entries keep the position at which their field was
//! first reported, so output order follows declaration order.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::failure::FieldFailure;

/// A rendered message for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedError {
    /// Field name.
    pub field: String,
    /// Localized message.
    pub message: String,
}

/// Field name → rendered message.
///
/// Serializes as a flat JSON object, e.g. `{"Name": "Name必须是中文字符"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMessages(IndexMap<String, String>);

impl FieldMessages {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a message, returning the one it replaced.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(field.into(), message.into())
    }

    /// Message for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of fields with a message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no field has a message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(field, message)` pairs in first-reported order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the underlying map.
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

impl FromIterator<RenderedError> for FieldMessages {
    fn from_iter<I: IntoIterator<Item = RenderedError>>(iter: I) -> Self {
        let mut messages = Self::new();
        for rendered in iter {
            messages.insert(rendered.field, rendered.message);
        }
        messages
    }
}

impl IntoIterator for FieldMessages {
    type Item = RenderedError;
    type IntoIter = std::iter::Map<
        indexmap::map::IntoIter<String, String>,
        fn((String, String)) -> RenderedError,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0
            .into_iter()
            .map(to_rendered as fn((String, String)) -> RenderedError)
    }
}

fn to_rendered((field, message): (String, String)) -> RenderedError {
    RenderedError { field, message }
}

impl fmt::Display for FieldMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed for {} field(s):", self.len())?;
        for (field, message) in self.iter() {
            writeln!(f, "  {field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldMessages {}

/// Renders each failure and collects the results by field.
///
/// Returns an empty mapping (not an absent one) for an empty input.
///
/// # Examples
///
/// ```
/// use glossa_validator::aggregate::aggregate;
/// use glossa_validator::failure::FieldFailure;
///
/// let failures = [FieldFailure::new("age", "min"), FieldFailure::new("age", "max")];
/// let messages = aggregate(&failures, |f| format!("{} {}", f.field, f.rule));
///
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages.get("age"), Some("age max"));
/// ```
pub fn aggregate<'a, I, F>(failures: I, mut render: F) -> FieldMessages
where
    I: IntoIterator<Item = &'a FieldFailure>,
    F: FnMut(&FieldFailure) -> String,
{
    failures
        .into_iter()
        .map(|failure| RenderedError {
            field: failure.field.clone(),
            message: render(failure),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(failure: &FieldFailure) -> String {
        format!("{}:{}", failure.field, failure.rule)
    }

    #[test]
    fn empty_input_gives_empty_mapping() {
        let messages = aggregate(&Vec::<FieldFailure>::new(), render);
        assert!(messages.is_empty());
        assert_eq!(messages, FieldMessages::new());
    }

    #[test]
    fn last_failure_per_field_wins() {
        let failures = vec![
            FieldFailure::new("age", "min"),
            FieldFailure::new("name", "required"),
            FieldFailure::new("age", "max"),
        ];
        let messages = aggregate(&failures, render);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages.get("age"), Some("age:max"));
        assert_eq!(
            messages.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["age", "name"]
        );
    }

    #[test]
    fn serializes_as_flat_object() {
        let failures = [FieldFailure::new("Name", "chinese")];
        let messages = aggregate(&failures, |_| "Name必须是中文字符".to_owned());

        let json = serde_json::to_value(&messages).unwrap();
        assert_eq!(json, serde_json::json!({"Name": "Name必须是中文字符"}));
    }

    #[test]
    fn into_iter_yields_rendered_errors() {
        let failures = [FieldFailure::new("a", "x")];
        let rendered: Vec<RenderedError> = aggregate(&failures, render).into_iter().collect();
        assert_eq!(
            rendered,
            vec![RenderedError {
                field: "a".into(),
                message: "a:x".into()
            }]
        );
    }

    #[test]
    fn display_lists_fields() {
        let mut messages = FieldMessages::new();
        messages.insert("a", "bad");
        assert_eq!(messages.to_string(), "Validation failed for 1 field(s):\n  a: bad\n");
    }
}
