//! Validation runner.
//!
//! Walks a [`Schema`] over an input value, evaluates each declared rule via the
//! [`PredicateRegistry`] and records a [`FieldFailure`] for every rule that
//! does not hold. Failures come out in field-declaration order, then
//! rule-declaration order within a field.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::failure::FieldFailure;
use crate::registry::PredicateRegistry;
use crate::schema::{FieldRules, OMIT_EMPTY, Schema};

static NULL: Value = Value::Null;

/// A typed input that knows its own rule declarations.
///
/// ```
/// use glossa_validator::runner::Validatable;
/// use glossa_validator::schema::Schema;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct SignUp {
///     #[serde(rename = "Name")]
///     name: String,
/// }
///
/// impl Validatable for SignUp {
///     fn schema() -> Schema {
///         Schema::new().field("Name", "required,chinese_name")
///     }
/// }
/// ```
pub trait Validatable: Serialize {
    /// Field and rule declarations for this type.
    fn schema() -> Schema;
}

/// Executes predicates against inputs.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRunner<'a> {
    registry: &'a PredicateRegistry,
}

impl<'a> ValidationRunner<'a> {
    /// Creates a runner over `registry`.
    pub fn new(registry: &'a PredicateRegistry) -> Self {
        Self { registry }
    }

    /// Validates `input` against `schema`.
    ///
    /// A rule name with no registered predicate produces an
    /// [`UnknownRule`](crate::failure::FailureKind::UnknownRule) failure and the
    /// run continues with the next rule.
    pub fn validate(&self, schema: &Schema, input: &Value) -> Vec<FieldFailure> {
        let mut failures = Vec::new();
        for field in schema.fields() {
            self.validate_field(field, input, &mut failures);
        }
        failures
    }

    /// Serializes `input` to a JSON value and validates it against `T::schema()`.
    pub fn validate_typed<T: Validatable>(&self, input: &T) -> Result<Vec<FieldFailure>> {
        let value = serde_json::to_value(input)?;
        Ok(self.validate(&T::schema(), &value))
    }

    fn validate_field(&self, field: &FieldRules, input: &Value, failures: &mut Vec<FieldFailure>) {
        let value = lookup(input, field.path());

        for rule in field.rules() {
            if rule.name == OMIT_EMPTY {
                if is_empty(value) {
                    break;
                }
                continue;
            }

            let failure = match self.registry.resolve(&rule.name) {
                Ok(predicate) if predicate.evaluate(value, &rule.params) => continue,
                Ok(_) => FieldFailure::new(field.field(), rule.name.as_str()),
                Err(not_found) => {
                    warn!(
                        rule = %not_found.rule,
                        path = field.path(),
                        "field references unregistered validation rule"
                    );
                    FieldFailure::unknown_rule(field.field(), not_found.rule)
                }
            };

            failures.push(
                failure
                    .with_path(field.path())
                    .with_params(rule.params.iter().cloned()),
            );
        }
    }
}

/// Resolves a dotted path. Missing segments resolve to `null`.
fn lookup<'v>(root: &'v Value, path: &str) -> &'v Value {
    path.split('.')
        .try_fold(root, |value, segment| match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
        .unwrap_or(&NULL)
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::failure::FailureKind;

    fn registry() -> PredicateRegistry {
        let mut registry = PredicateRegistry::new();
        registry
            .register_fn("required", |v, _| !is_empty(v))
            .unwrap();
        registry
            .register_fn("min", |v, p| {
                let min = p.first().and_then(|p| p.parse::<f64>().ok());
                matches!((v.as_f64(), min), (Some(n), Some(min)) if n >= min)
            })
            .unwrap();
        registry
            .register_fn("max", |v, p| {
                let max = p.first().and_then(|p| p.parse::<f64>().ok());
                matches!((v.as_f64(), max), (Some(n), Some(max)) if n <= max)
            })
            .unwrap();
        registry
    }

    #[test]
    fn valid_input_has_no_failures() {
        let registry = registry();
        let schema = Schema::new().field("Name", "required").field("Age", "min=18");
        let failures = ValidationRunner::new(&registry)
            .validate(&schema, &json!({"Name": "张三", "Age": 30}));
        assert!(failures.is_empty());
    }

    #[test]
    fn failures_follow_declaration_order() {
        let registry = registry();
        let schema = Schema::new()
            .field("Name", "required")
            .field("Age", "min=18,max=10");
        let failures =
            ValidationRunner::new(&registry).validate(&schema, &json!({"Name": "", "Age": 12}));

        let got: Vec<_> = failures
            .iter()
            .map(|f| (f.field.as_str(), f.rule.as_str()))
            .collect();
        assert_eq!(got, [("Name", "required"), ("Age", "min"), ("Age", "max")]);
        assert_eq!(failures[1].params.as_slice(), ["18"]);
    }

    #[test]
    fn unknown_rule_does_not_block_other_fields() {
        let registry = registry();
        let schema = Schema::new()
            .field("Name", "nickname,required")
            .field("Age", "min=18");
        let failures =
            ValidationRunner::new(&registry).validate(&schema, &json!({"Name": "", "Age": 1}));

        assert_eq!(failures.len(), 3);
        assert_eq!(failures[0].kind, FailureKind::UnknownRule);
        assert_eq!(failures[0].rule, "nickname");
        assert_eq!(failures[1].rule, "required");
        assert_eq!(failures[2].field, "Age");
    }

    #[test]
    fn missing_field_is_null() {
        let registry = registry();
        let schema = Schema::new().field("Name", "required");
        let failures = ValidationRunner::new(&registry).validate(&schema, &json!({}));
        assert_eq!(failures, vec![FieldFailure::new("Name", "required")]);
    }

    #[test]
    fn nested_paths_report_leaf_and_path() {
        let registry = registry();
        let schema = Schema::new()
            .field("Address.Zip", "required")
            .field("Items.1.Qty", "min=1");
        let input = json!({
            "Address": {"Zip": ""},
            "Items": [{"Qty": 5}, {"Qty": 0}]
        });
        let failures = ValidationRunner::new(&registry).validate(&schema, &input);

        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].field, "Zip");
        assert_eq!(failures[0].path, "Address.Zip");
        assert_eq!(failures[1].field, "Qty");
        assert_eq!(failures[1].path, "Items.1.Qty");
    }

    #[test]
    fn omitempty_skips_remaining_rules() {
        let registry = registry();
        let schema = Schema::new().field("Age", "omitempty,min=18");
        let runner = ValidationRunner::new(&registry);

        assert!(runner.validate(&schema, &json!({})).is_empty());
        assert_eq!(runner.validate(&schema, &json!({"Age": 3})).len(), 1);
    }

    #[test]
    fn typed_input_uses_its_schema() {
        #[derive(Serialize)]
        struct Person {
            #[serde(rename = "Age")]
            age: u32,
        }

        impl Validatable for Person {
            fn schema() -> Schema {
                Schema::new().field("Age", "min=18")
            }
        }

        let registry = registry();
        let failures = ValidationRunner::new(&registry)
            .validate_typed(&Person { age: 7 })
            .unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].rule, "min");
    }
}
