//! Validates a sign-up payload and prints Chinese error messages.
//!
//! Run with `RUST_LOG=glossa_validator=debug` to see registration logs.

use glossa_validator::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = LocalizationConfig::from_toml_str(
        r#"
        locale = "zh"

        [messages]
        phone = "{0}不是有效的手机号码"
        "#,
    )?;

    let ctx = config
        .into_builder()?
        .register_rule("username", |v, _| {
            v.as_str()
                .is_some_and(|s| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        })?
        .bind_translation("zh", "username", "{0}只能包含字母、数字和下划线")?
        .build()?;

    let schema = Schema::new()
        .field("Name", "required,chinese_name")
        .field("Login", "required,username,min=3")
        .field("Mobile", "required,phone")
        .field("Password", "required,strong_password")
        .field("Profile.Email", "omitempty,email")
        .field("Profile.Zip", "omitempty,zipcode");

    let payload = json!({
        "Name": "Tom",
        "Login": "a!",
        "Mobile": "1234",
        "Password": "Passw0rd!",
        "Profile": {"Email": "tom@example.com", "Zip": "10001"}
    });

    match ctx.check(&schema, &payload) {
        Ok(()) => println!("payload is valid"),
        Err(messages) => {
            for (field, message) in messages.iter() {
                println!("{field}: {message}");
            }
            println!("{}", serde_json::to_string_pretty(&messages)?);
        }
    }

    Ok(())
}
