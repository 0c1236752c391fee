//! English messages.

/// `(rule, template)` pairs bound when the active locale is `en`.
pub const MESSAGES: &[(&str, &str)] = &[
    ("required", "{0} is a required field"),
    ("min", "{0} must be {1} or greater"),
    ("max", "{0} must be {1} or less"),
    ("len", "{0} must be {1} characters in length"),
    ("between", "{0} must be between {1} and {2}"),
    ("email", "{0} must be a valid email address"),
    ("phone", "{0} must be a valid mainland China mobile number"),
    ("idcard", "{0} must be a valid resident ID number"),
    ("chinese_name", "{0} must be 2-4 Chinese characters"),
    (
        "strong_password",
        "{0} must be at least 8 characters with upper and lower case letters, digits and symbols",
    ),
    ("chinese", "{0} must contain only Chinese characters"),
    ("date", "{0} must be a valid date (YYYY-MM-DD)"),
    ("url", "{0} must be a valid URL"),
    ("zipcode", "{0} must be a valid 6-digit postal code"),
    ("unknown_rule", "{0} uses unregistered validation rule {1}"),
];
