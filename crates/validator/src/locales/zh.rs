//! Simplified Chinese messages.

/// `(rule, template)` pairs bound when the active locale is `zh`.
pub const MESSAGES: &[(&str, &str)] = &[
    // Common rules
    ("required", "{0}为必填字段"),
    ("min", "{0}最小只能为{1}"),
    ("max", "{0}必须小于或等于{1}"),
    ("len", "{0}长度必须是{1}"),
    ("between", "{0}必须介于{1}和{2}之间"),
    ("email", "{0}必须是一个有效的邮箱"),
    // Domain rules
    ("phone", "{0}必须是有效的中国手机号"),
    ("idcard", "{0}必须是有效的身份证号"),
    ("chinese_name", "{0}必须是2-4个中文字符"),
    ("strong_password", "{0}必须至少8位，包含大小写字母、数字和特殊字符"),
    ("chinese", "{0}必须是中文字符"),
    ("date", "{0}必须是有效的日期格式(YYYY-MM-DD)"),
    ("url", "{0}必须是有效的URL地址"),
    ("zipcode", "{0}必须是有效的6位邮政编码"),
    // Misconfiguration
    ("unknown_rule", "{0}使用了未注册的校验规则{1}"),
];
