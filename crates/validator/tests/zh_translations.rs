//! End-to-end checks of the Chinese message set.

#![cfg(feature = "builtin")]

use std::sync::Arc;
use std::thread;

use glossa_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;

fn zh() -> LocalizationContext {
    LocalizationContext::builder("zh")
        .with_default_messages()
        .unwrap()
        .with_builtin_rules()
        .unwrap()
        .build()
        .unwrap()
}

fn sign_up() -> Schema {
    Schema::new()
        .field("Name", "required,chinese_name")
        .field("Mobile", "required,phone")
        .field("Age", "min=18,max=60")
        .field("Email", "omitempty,email")
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn chinese_name_message() {
    let ctx = zh();
    let messages = ctx
        .check(&sign_up(), &json!({"Name": "Tom", "Mobile": "13812345678", "Age": 30}))
        .unwrap_err();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages.get("Name"), Some("Name必须是2-4个中文字符"));
}

#[test]
fn valid_input_has_no_failures() {
    let ctx = zh();
    let input = json!({"Name": "王小明", "Mobile": "13812345678", "Age": 30});

    assert!(ctx.validate(&sign_up(), &input).is_empty());
    assert_eq!(ctx.check(&sign_up(), &input), Ok(()));
}

#[test]
fn parameters_fill_placeholders() {
    let ctx = zh();
    let schema = Schema::new().field("Nick", "between=2 4");
    let messages = ctx.check(&schema, &json!({"Nick": "abcdef"})).unwrap_err();

    assert_eq!(messages.get("Nick"), Some("Nick必须介于2和4之间"));
}

#[test]
fn missing_field_fails_required() {
    let ctx = zh();
    let schema = Schema::new().field("Mobile", "required");
    let messages = ctx.check(&schema, &json!({"Name": "王小明"})).unwrap_err();

    assert_eq!(messages.get("Mobile"), Some("Mobile为必填字段"));
}

#[test]
fn missing_field_reports_last_failing_rule() {
    let ctx = zh();
    let input = json!({"Name": "王小明", "Age": 30});

    let rules: Vec<_> = ctx
        .validate(&sign_up(), &input)
        .into_iter()
        .map(|failure| failure.rule)
        .collect();
    assert_eq!(rules, ["required", "phone"]);

    let messages = ctx.check(&sign_up(), &input).unwrap_err();
    assert_eq!(messages.get("Mobile"), Some("Mobile必须是有效的中国手机号"));
}

#[test]
fn omitempty_skips_absent_value() {
    let ctx = zh();
    let input = json!({"Name": "王小明", "Mobile": "13812345678", "Age": 30, "Email": ""});
    assert_eq!(ctx.check(&sign_up(), &input), Ok(()));

    let input = json!({"Name": "王小明", "Mobile": "13812345678", "Age": 30, "Email": "nope"});
    let messages = ctx.check(&sign_up(), &input).unwrap_err();
    assert_eq!(messages.get("Email"), Some("Email必须是一个有效的邮箱"));
}

#[test]
fn nested_path_reports_leaf_field() {
    let ctx = zh();
    let schema = Schema::new().field("Contacts.0.Mobile", "phone");
    let messages = ctx
        .check(&schema, &json!({"Contacts": [{"Mobile": "12345"}]}))
        .unwrap_err();

    assert_eq!(messages.get("Mobile"), Some("Mobile必须是有效的中国手机号"));
}

// ============================================================================
// OVERRIDES
// ============================================================================

#[test]
fn later_binding_replaces_earlier() {
    let ctx = LocalizationContext::builder("zh")
        .with_builtin_rules()
        .unwrap()
        .bind_translation("zh", "phone", "A{0}")
        .unwrap()
        .bind_translation("zh", "phone", "B{0}")
        .unwrap()
        .build()
        .unwrap();

    let messages = ctx
        .check(&Schema::new().field("Mobile", "phone"), &json!({"Mobile": "1"}))
        .unwrap_err();
    assert_eq!(messages.get("Mobile"), Some("BMobile"));
}

#[test]
fn reject_policy_reports_conflicts() {
    let builder = LocalizationContextBuilder::new("zh", DuplicatePolicy::Reject)
        .with_builtin_rules()
        .unwrap();

    let err = builder.register_rule("phone", |_, _| true).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateRule { rule: "phone".into() });

    let err = LocalizationContextBuilder::new("zh", DuplicatePolicy::Reject)
        .bind_translation("zh", "phone", "A{0}")
        .unwrap()
        .bind_translation("zh", "phone", "B{0}")
        .unwrap_err();
    assert!(matches!(err, RegistryError::ConflictingBinding { .. }));
}

#[test]
fn exclusive_binding_cannot_be_replaced() {
    let err = LocalizationContext::builder("zh")
        .bind_translation("zh", "phone", "A{0}")
        .unwrap()
        .bind(MessageBinding::new(Locale::new("zh"), "phone", "B{0}").exclusive())
        .unwrap_err();

    assert_eq!(
        err,
        RegistryError::ConflictingBinding {
            locale: Locale::new("zh"),
            rule: "phone".into(),
        }
    );
}

// ============================================================================
// AGGREGATION
// ============================================================================

#[test]
fn one_message_per_field_last_wins() {
    let ctx = zh();
    let schema = Schema::new().field("Age", "min=18,max=10");
    let messages = ctx.check(&schema, &json!({"Age": 15})).unwrap_err();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages.get("Age"), Some("Age必须小于或等于10"));
}

#[test]
fn fields_keep_first_failure_order() {
    let ctx = zh();
    let failures = [
        FieldFailure::new("B", "required"),
        FieldFailure::new("A", "required"),
        FieldFailure::new("B", "min").with_param("3"),
    ];
    let messages = ctx.translate(&failures);

    let fields: Vec<_> = messages.iter().map(|(field, _)| field).collect();
    assert_eq!(fields, ["B", "A"]);
    assert_eq!(messages.get("B"), Some("B最小只能为3"));
}

#[test]
fn empty_failures_aggregate_to_empty() {
    let ctx = zh();
    assert!(ctx.translate(&[]).is_empty());
    assert!(aggregate(&[] as &[FieldFailure], |_| unreachable!()).is_empty());
}

#[test]
fn messages_serialize_as_object() {
    let ctx = zh();
    let messages = ctx
        .check(&sign_up(), &json!({"Name": "Tom", "Mobile": "1", "Age": 30}))
        .unwrap_err();

    assert_eq!(
        serde_json::to_value(&messages).unwrap(),
        json!({
            "Name": "Name必须是2-4个中文字符",
            "Mobile": "Mobile必须是有效的中国手机号",
        })
    );
}

// ============================================================================
// MISCONFIGURATION
// ============================================================================

#[test]
fn unknown_rule_is_reported() {
    let ctx = zh();
    let schema = Schema::new().field("Code", "required,checksum");
    let failures = ctx.validate(&schema, &json!({"Code": "x"}));

    assert_eq!(failures.len(), 1);
    assert!(failures[0].is_unknown_rule());

    let messages = ctx.translate(&failures);
    assert_eq!(messages.get("Code"), Some("Code使用了未注册的校验规则checksum"));
}

#[test]
fn unbound_rule_falls_back() {
    let ctx = LocalizationContext::builder("zh")
        .register_rule("even", |v, _| v.as_i64().is_some_and(|n| n % 2 == 0))
        .unwrap()
        .bind_translation("zh", "required", "{0}为必填字段")
        .unwrap()
        .build()
        .unwrap();

    let messages = ctx
        .check(&Schema::new().field("Count", "even"), &json!({"Count": 3}))
        .unwrap_err();
    assert_eq!(messages.get("Count"), Some("Count failed validation rule even"));
}

// ============================================================================
// CONFIG, TYPED INPUT, SHARING
// ============================================================================

#[test]
fn config_overrides_defaults() {
    let config = LocalizationConfig::from_toml_str(
        r#"
        locale = "zh"

        [messages]
        phone = "{0}不是有效的手机号码"
        "#,
    )
    .unwrap();
    let ctx = config.into_builder().unwrap().build().unwrap();

    let messages = ctx
        .check(&Schema::new().field("Mobile", "phone"), &json!({"Mobile": "1"}))
        .unwrap_err();
    assert_eq!(messages.get("Mobile"), Some("Mobile不是有效的手机号码"));
}

#[derive(Serialize)]
struct SignUp {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Password")]
    password: String,
}

impl Validatable for SignUp {
    fn schema() -> Schema {
        Schema::new()
            .field("Name", "required,chinese_name")
            .field("Password", "required,strong_password")
    }
}

#[test]
fn typed_input() {
    let ctx = zh();
    let input = SignUp {
        name: "李雷".into(),
        password: "weak".into(),
    };

    let failures = ctx.validate_typed(&input).unwrap();
    let messages = ctx.translate(&failures);

    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages.get("Password"),
        Some("Password必须至少8位，包含大小写字母、数字和特殊字符")
    );
}

#[test]
fn shared_across_threads() {
    let ctx = Arc::new(zh());

    let handles: Vec<_> = ["Tom", "王小明", "A", "李雷"]
        .into_iter()
        .map(|name| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                let schema = Schema::new().field("Name", "chinese_name");
                ctx.check(&schema, &json!({"Name": name}))
                    .err()
                    .and_then(|m| m.get("Name").map(str::to_owned))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let expected = Some("Name必须是2-4个中文字符".to_owned());
    assert_eq!(results, [expected.clone(), None, expected, None]);
}
