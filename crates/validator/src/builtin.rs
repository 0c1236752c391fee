//! Ready-made predicates.
//!
//! Every rule here has a template in the [`locales`](crate::locales) tables.
//! String rules reject non-string values, including `null`; pair them with
//! `omitempty` for optional fields.
//!
//! Size rules (`min`, `max`, `len`, `between`) measure strings in characters,
//! arrays and objects by element count, and numbers by value.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::RegistryError;
use crate::registry::PredicateRegistry;

/// Signature shared by the built-in predicates.
pub type PredicateFn = fn(&Value, &[String]) -> bool;

/// Declarative `(rule, predicate)` table registered by [`register_builtin`].
pub const BUILTIN_RULES: &[(&str, PredicateFn)] = &[
    ("required", required),
    ("min", min),
    ("max", max),
    ("len", len),
    ("between", between),
    ("email", email),
    ("phone", phone),
    ("idcard", idcard),
    ("chinese_name", chinese_name),
    ("strong_password", strong_password),
    ("chinese", chinese),
    ("date", date),
    ("url", url),
    ("zipcode", zipcode),
];

/// Registers every rule of [`BUILTIN_RULES`].
pub fn register_builtin(registry: &mut PredicateRegistry) -> Result<(), RegistryError> {
    for (name, predicate) in BUILTIN_RULES {
        registry.register_fn(*name, *predicate)?;
    }
    Ok(())
}

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("phone pattern is valid"));

static IDCARD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[1-9][0-9]{5}(18|19|20)[0-9]{2}(0[1-9]|1[0-2])(0[1-9]|[12][0-9]|3[01])[0-9]{3}[0-9Xx]$",
    )
    .expect("idcard pattern is valid")
});

static CHINESE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Han}{2,4}$").expect("chinese name pattern is valid"));

static CHINESE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Han}+$").expect("chinese pattern is valid"));

static ZIPCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("zipcode pattern is valid"));

// ============================================================================
// GENERIC RULES
// ============================================================================

/// Present and not an empty string, array or object.
pub fn required(value: &Value, _params: &[String]) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(map) => Some(map.len() as f64),
        Value::Number(n) => n.as_f64(),
        Value::Null | Value::Bool(_) => None,
    }
}

fn param(params: &[String], index: usize) -> Option<f64> {
    params.get(index)?.parse().ok()
}

/// Size or value is at least `params[0]`.
pub fn min(value: &Value, params: &[String]) -> bool {
    matches!((measure(value), param(params, 0)), (Some(n), Some(min)) if n >= min)
}

/// Size or value is at most `params[0]`.
pub fn max(value: &Value, params: &[String]) -> bool {
    matches!((measure(value), param(params, 0)), (Some(n), Some(max)) if n <= max)
}

/// Size or value equals `params[0]`.
pub fn len(value: &Value, params: &[String]) -> bool {
    matches!(
        (measure(value), param(params, 0)),
        (Some(n), Some(len)) if (n - len).abs() < f64::EPSILON
    )
}

/// Size or value lies within `params[0]..=params[1]`.
pub fn between(value: &Value, params: &[String]) -> bool {
    match (measure(value), param(params, 0), param(params, 1)) {
        (Some(n), Some(lo), Some(hi)) => lo <= n && n <= hi,
        _ => false,
    }
}

// ============================================================================
// STRING RULES
// ============================================================================

fn is_match(value: &Value, pattern: &Regex) -> bool {
    value.as_str().is_some_and(|s| pattern.is_match(s))
}

/// Email address.
pub fn email(value: &Value, _params: &[String]) -> bool {
    is_match(value, &EMAIL_REGEX)
}

/// Mainland China mobile number, 11 digits starting with `13`..`19`.
pub fn phone(value: &Value, _params: &[String]) -> bool {
    is_match(value, &PHONE_REGEX)
}

/// 18-character resident identity number with a valid check digit.
pub fn idcard(value: &Value, _params: &[String]) -> bool {
    const WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];
    const CHECK: [char; 11] = ['1', '0', 'X', '9', '8', '7', '6', '5', '4', '3', '2'];

    let Some(id) = value.as_str() else {
        return false;
    };
    if !IDCARD_REGEX.is_match(id) {
        return false;
    }

    let sum: u32 = id
        .chars()
        .zip(WEIGHTS)
        .filter_map(|(c, w)| c.to_digit(10).map(|d| d * w))
        .sum();
    let expected = CHECK[(sum % 11) as usize];
    id.chars()
        .last()
        .is_some_and(|c| c.to_ascii_uppercase() == expected)
}

/// Two to four Han characters.
pub fn chinese_name(value: &Value, _params: &[String]) -> bool {
    is_match(value, &CHINESE_NAME_REGEX)
}

/// At least 8 characters with an upper case letter, a lower case letter, a
/// digit and a character that is none of those.
pub fn strong_password(value: &Value, _params: &[String]) -> bool {
    let Some(password) = value.as_str() else {
        return false;
    };
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

/// Han characters only.
pub fn chinese(value: &Value, _params: &[String]) -> bool {
    is_match(value, &CHINESE_REGEX)
}

/// Calendar date written as `YYYY-MM-DD`.
pub fn date(value: &Value, _params: &[String]) -> bool {
    value.as_str().is_some_and(is_calendar_date)
}

fn is_calendar_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return false;
    }
    let (Ok(year), Ok(month), Ok(day)) = (
        s[0..4].parse::<u32>(),
        s[5..7].parse::<u32>(),
        s[8..10].parse::<u32>(),
    ) else {
        return false;
    };

    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => return false,
    };
    (1..=days).contains(&day)
}

/// Absolute `http` or `https` URL with a host.
pub fn url(value: &Value, _params: &[String]) -> bool {
    value
        .as_str()
        .and_then(|s| ::url::Url::parse(s).ok())
        .is_some_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
}

/// Six-digit postal code.
pub fn zipcode(value: &Value, _params: &[String]) -> bool {
    is_match(value, &ZIPCODE_REGEX)
}
