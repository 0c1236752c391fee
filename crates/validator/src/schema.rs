//! Field/rule declarations.
//!
//! A [`Schema`] lists fields in declaration order, each with an ordered list
//! of rules. Rules can be declared programmatically or parsed from a compact
//! list such as `"required,min=2,between=2 4"`: commas separate rules,
//! `=` introduces whitespace-separated parameters.

use std::fmt;
use std::str::FromStr;

use crate::failure::Params;

/// Directive that skips a field's remaining rules when its value is empty.
///
/// It is handled by the runner and never looked up in the registry.
pub const OMIT_EMPTY: &str = "omitempty";

// ============================================================================
// RULE REFERENCE
// ============================================================================

/// One rule applied to a field, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleRef {
    /// Registered rule name.
    pub name: String,
    /// Parameters passed to the predicate and to the message template.
    pub params: Params,
}

impl RuleRef {
    /// A rule without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Params::new(),
        }
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

    /// Parses `name` or `name=p1 p2`.
    pub fn parse(decl: &str) -> Self {
        match decl.split_once('=') {
            Some((name, params)) => Self::new(name.trim()).with_params(params.split_whitespace()),
            None => Self::new(decl.trim()),
        }
    }
}

impl FromStr for RuleRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.params.is_empty() {
            write!(f, "={}", self.params.join(" "))?;
        }
        Ok(())
    }
}

/// Parses a comma separated rule list, skipping empty entries.
///
/// ```
/// use glossa_validator::schema::parse_rules;
///
/// let rules = parse_rules("required, min=2 ,between=2 4,");
/// let names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, ["required", "min", "between"]);
/// assert_eq!(rules[2].params.as_slice(), ["2", "4"]);
/// ```
pub fn parse_rules(decl: &str) -> Vec<RuleRef> {
    decl.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(RuleRef::parse)
        .collect()
}

// ============================================================================
// FIELD RULES
// ============================================================================

/// Rules declared for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    path: String,
    rules: Vec<RuleRef>,
}

impl FieldRules {
    /// Declares a field by dotted path (`Name`, `Address.Zip`, `Items.0.Sku`).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rules: Vec::new(),
        }
    }

    /// Declares a field and parses its rule list.
    pub fn parse(path: impl Into<String>, decl: &str) -> Self {
        Self {
            path: path.into(),
            rules: parse_rules(decl),
        }
    }

    /// Appends a rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, rule: RuleRef) -> Self {
        self.rules.push(rule);
        self
    }

    /// Dotted path from the input root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment; the key messages are reported under.
    pub fn field(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[RuleRef] {
        &self.rules
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Ordered field declarations for one input shape.
///
/// ```
/// use glossa_validator::schema::Schema;
///
/// let schema = Schema::new()
///     .field("Name", "required,chinese_name")
///     .field("Age", "min=18,max=60");
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.fields()[1].rules()[0].to_string(), "min=18");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field with a compact rule list.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(self, path: impl Into<String>, decl: &str) -> Self {
        self.with(FieldRules::parse(path, decl))
    }

    /// Appends a fully built field declaration.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, field: FieldRules) -> Self {
        self.fields.push(field);
        self
    }

    /// Field declarations in order.
    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
