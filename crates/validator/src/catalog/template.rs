//! Message templates with positional placeholders.
//!
//! A template is plain text with `{N}` markers. `{0}` is the field's display
//! name, `{1}..{N}` are the failing rule's parameters in declaration order.
//!
//! Rendering is lenient on purpose: a placeholder without a matching argument
//! renders as the empty string, and a brace that does not form a valid
//! `{digits}` marker is kept as literal text. Callers writing tests should
//! expect `"{0} between {1} and {2}"` rendered with a single parameter to
//! produce `"Age between 18 and "`.

use std::fmt;

use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(usize),
}

/// A parsed message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: SmallVec<[Segment; 4]>,
}

impl Template {
    /// Parses a template. Never fails; malformed markers stay literal.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = parse_segments(&source);
        Self { source, segments }
    }

    /// The template as it was registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// One past the highest placeholder index referenced, or zero.
    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(index) => Some(index.saturating_add(1)),
                Segment::Literal(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Substitutes `field` for `{0}` and `params[i - 1]` for `{i}`.
    pub fn render<S: AsRef<str>>(&self, field: &str, params: &[S]) -> String {
        let mut out = String::with_capacity(self.source.len() + field.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(0) => out.push_str(field),
                Segment::Placeholder(index) => {
                    if let Some(param) = params.get(index - 1) {
                        out.push_str(param.as_ref());
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::parse(source)
    }
}

fn parse_segments(source: &str) -> SmallVec<[Segment; 4]> {
    let mut segments = SmallVec::new();
    let mut literal = String::new();
    let mut rest = source;

    while let Some(open) = rest.find('{') {
        literal.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();

        let index = (digits > 0 && after[digits..].starts_with('}'))
            .then(|| after[..digits].parse::<usize>().ok())
            .flatten();

        match index {
            Some(index) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(index));
                rest = &after[digits + 1..];
            }
            None => {
                literal.push('{');
                rest = after;
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}
