//! Built-in message tables.
//!
//! Each table is a declarative list of `(rule, template)` pairs that a
//! [`LocalizationContextBuilder`](crate::LocalizationContextBuilder) binds once
//! at startup.

pub mod en;
pub mod zh;

use crate::catalog::Locale;

/// Returns the built-in table for `locale`, matching on the language subtag.
///
/// ```
/// use glossa_validator::catalog::Locale;
/// use glossa_validator::locales::defaults_for;
///
/// assert!(defaults_for(&Locale::new("zh-CN")).is_some());
/// assert!(defaults_for(&Locale::new("fr")).is_none());
/// ```
pub fn defaults_for(locale: &Locale) -> Option<&'static [(&'static str, &'static str)]> {
    let language = locale
        .as_str()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match language.as_str() {
        "zh" => Some(zh::MESSAGES),
        "en" => Some(en::MESSAGES),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::translate::UNKNOWN_RULE;

    fn rules<'a>(table: &[(&'a str, &str)]) -> HashSet<&'a str> {
        table.iter().map(|(rule, _)| *rule).collect()
    }

    #[test]
    fn tables_cover_the_same_rules() {
        assert_eq!(rules(zh::MESSAGES), rules(en::MESSAGES));
    }

    #[test]
    fn tables_have_no_duplicate_rules() {
        assert_eq!(rules(zh::MESSAGES).len(), zh::MESSAGES.len());
        assert_eq!(rules(en::MESSAGES).len(), en::MESSAGES.len());
    }

    #[test]
    fn tables_bind_unknown_rule() {
        assert!(rules(zh::MESSAGES).contains(UNKNOWN_RULE));
    }

    #[test]
    fn every_template_names_the_field() {
        for (rule, template) in zh::MESSAGES.iter().chain(en::MESSAGES) {
            assert!(template.contains("{0}"), "{rule} template misses {{0}}");
        }
    }

    #[test]
    fn language_subtag_is_case_insensitive() {
        assert_eq!(defaults_for(&Locale::new("ZH_hans")), Some(zh::MESSAGES));
        assert_eq!(defaults_for(&Locale::new("en-US")), Some(en::MESSAGES));
    }
}
